//! Fast-then-diagnostic validation of one record against one schema
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::registry::Schema;
use crate::validation::error::{
    EngineDisagreement, SchemaValidationError, ValidationResult,
};
use serde_json::Value;
use tracing::{debug, error};

/// Runs the fast matcher and falls back to the diagnostic one on rejection
#[derive(Debug, Clone, Copy)]
pub struct DualValidator<'a> {
    schema: &'a Schema,
}

impl<'a> DualValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Accept, reject with diagnostics, or report an engine disagreement
    ///
    /// The diagnostic engine only runs when the fast engine rejects.
    pub fn validate(&self, record: &Value) -> ValidationResult<()> {
        let fast = self.schema.fast();
        if fast.is_match(record) {
            return Ok(());
        }

        let diagnostic = self.schema.diagnostic();
        let violations = diagnostic.violations(record);
        let category = self.schema.category();

        if violations.is_empty() {
            let fast_report = fast
                .violations(record)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");

            error!(
                category = %category,
                fast_engine = fast.engine(),
                diagnostic_engine = diagnostic.engine(),
                fast_report = %fast_report,
                "Schema engines disagree on a record"
            );

            return Err(EngineDisagreement {
                category,
                fast_engine: fast.engine().to_string(),
                diagnostic_engine: diagnostic.engine().to_string(),
                fast_report,
            }
            .into());
        }

        let rejection = SchemaValidationError::from_violations(category, violations);
        debug!(
            category = %category,
            path = rejection.path(),
            violations = rejection.violations().len(),
            "Record rejected"
        );
        Err(rejection.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::SchemaCategory;
    use serde_json::json;
    use std::path::PathBuf;

    fn schema(tree: Value) -> Schema {
        Schema::from_tree(SchemaCategory::Vote, PathBuf::from("inline"), tree).unwrap()
    }

    #[test]
    fn test_accepts() {
        let schema = schema(json!({"type": "object", "required": ["vote"]}));
        assert!(DualValidator::new(&schema).validate(&json!({"vote": 1})).is_ok());
    }

    #[test]
    fn test_rejection_names_field_and_path() {
        let schema = schema(json!({
            "type": "object",
            "properties": {"vote": {"type": "object", "required": ["timestamp"]}}
        }));

        let err = DualValidator::new(&schema)
            .validate(&json!({"vote": {}}))
            .unwrap_err();
        let rejection = err.as_schema_error().unwrap();
        assert_eq!(rejection.path(), "$.vote");
        assert!(rejection.message().contains("timestamp"));
        assert_eq!(rejection.category(), SchemaCategory::Vote);
    }
}
