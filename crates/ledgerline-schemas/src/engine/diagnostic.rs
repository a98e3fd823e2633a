//! Diagnostic engine backed by the `jsonschema` crate
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use super::SchemaMatcher;
use crate::validation::context::ValidationContext;
use crate::validation::error::Violation;
use jsonschema::{Draft, Validator};
use serde_json::Value;

/// Reference validator used to explain rejections
pub struct DiagnosticSchema {
    validator: Validator,
}

impl DiagnosticSchema {
    /// Build the validator for a schema tree
    ///
    /// Fails when the tree itself is not a valid draft-07 schema.
    pub fn new(tree: &Value) -> Result<Self, String> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .build(tree)
            .map_err(|e| e.to_string())?;
        Ok(Self { validator })
    }
}

impl std::fmt::Debug for DiagnosticSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticSchema").finish_non_exhaustive()
    }
}

impl SchemaMatcher for DiagnosticSchema {
    fn engine(&self) -> &'static str {
        "jsonschema"
    }

    fn is_match(&self, record: &Value) -> bool {
        self.validator.is_valid(record)
    }

    fn violations(&self, record: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(record)
            .map(|error| {
                Violation::new(
                    ValidationContext::from_pointer(&error.instance_path.to_string()).path,
                    error.schema_path.to_string(),
                    error.to_string(),
                )
            })
            .collect()
    }
}
