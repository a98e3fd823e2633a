//! Record validation entry points
//!
//! Every record is first matched by the compiled engine. Only rejected
//! records are re-validated by the diagnostic engine, which explains the
//! rejection; if it accepts instead, the disagreement is reported as an
//! internal fault rather than blamed on the record.
//!
//! Transactions are checked against the common schema, then against the
//! variant chosen by their `operation`. Votes have a single schema.
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

pub mod context;
pub mod dual;
pub mod error;

pub use context::ValidationContext;
pub use dual::DualValidator;
pub use error::{
    EngineDisagreement, SchemaValidationError, ValidationError, ValidationErrors,
    ValidationResult, Violation,
};

use crate::category::SchemaCategory;
use crate::registry::SchemaRegistry;
use crate::resolver::resolve_transaction_variant;
use serde_json::Value;

/// Validate a transaction against the common schema, then its variant
///
/// # Examples
///
/// ```rust
/// use ledgerline_schemas::{validate_transaction, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::embedded().unwrap();
/// let err = validate_transaction(&registry, &json!({})).unwrap_err();
/// assert!(err.to_string().contains("\"id\" is a required property"));
/// ```
pub fn validate_transaction(registry: &SchemaRegistry, record: &Value) -> ValidationResult<()> {
    registry.get(SchemaCategory::TransactionCommon).validate(record)?;
    registry.get(resolve_transaction_variant(record)).validate(record)
}

/// Validate a vote
pub fn validate_vote(registry: &SchemaRegistry, record: &Value) -> ValidationResult<()> {
    registry.get(SchemaCategory::Vote).validate(record)
}

/// Validation configuration for batch operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Whether to stop on first error or collect all errors
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Batch validation for transactions; error paths are prefixed with `$[i]`
pub fn validate_transactions_batch(
    registry: &SchemaRegistry,
    records: &[Value],
    config: &ValidationConfig,
) -> Result<(), ValidationErrors> {
    validate_batch(records, config, |record| validate_transaction(registry, record))
}

/// Batch validation for votes; error paths are prefixed with `$[i]`
pub fn validate_votes_batch(
    registry: &SchemaRegistry,
    records: &[Value],
    config: &ValidationConfig,
) -> Result<(), ValidationErrors> {
    validate_batch(records, config, |record| validate_vote(registry, record))
}

fn validate_batch<F>(records: &[Value], config: &ValidationConfig, validate: F) -> Result<(), ValidationErrors>
where
    F: Fn(&Value) -> ValidationResult<()>,
{
    let mut errors = ValidationErrors::new();
    let context = ValidationContext::new();

    for (i, record) in records.iter().enumerate() {
        let Err(error) = validate(record) else {
            continue;
        };

        // Results after a fault cannot be trusted
        let fault = error.is_internal_fault();
        errors.add_at(&context.child_index(i), error);

        if fault || config.fail_fast {
            break;
        }
        if config.max_errors > 0 && errors.len() >= config.max_errors {
            break;
        }
    }

    errors.into_result()
}
