//! Validation error types for ledger records
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::category::SchemaCategory;
use crate::validation::context::ValidationContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single schema violation with path context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Location in the record, e.g. `$.inputs[0].fulfills`
    pub instance_path: String,
    /// JSON pointer to the schema keyword that failed
    pub schema_path: String,
    /// What went wrong
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new<I, S, M>(instance_path: I, schema_path: S, message: M) -> Self
    where
        I: Into<String>,
        S: Into<String>,
        M: Into<String>,
    {
        Self {
            instance_path: instance_path.into(),
            schema_path: schema_path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}'", self.message, self.instance_path)
    }
}

/// A record does not conform to its schema
///
/// The `Display` output is the single message meant for the submitter.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaValidationError {
    /// Schema the record was checked against
    pub category: SchemaCategory,
    /// Record path of the first violation
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Every violation the diagnostic engine reported
    pub violations: Vec<Violation>,
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl SchemaValidationError {
    /// Create an error with a single message and no violation detail
    pub fn new<P, M>(category: SchemaCategory, path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            category,
            path: path.into(),
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Build the error from a diagnostic report
    pub fn from_violations(category: SchemaCategory, violations: Vec<Violation>) -> Self {
        let path = violations
            .first()
            .map(|v| v.instance_path.clone())
            .unwrap_or_else(|| "$".to_string());

        let message = match violations.as_slice() {
            [] => format!("Invalid {} record", category),
            [only] => format!("Invalid {} record: {}", category, only),
            many => format!(
                "Invalid {} record: {} violations: {}",
                category,
                many.len(),
                many.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            ),
        };

        Self {
            category,
            path,
            message,
            violations,
        }
    }

    /// Message to surface to the submitter
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Record path of the first violation
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Schema the record failed against
    pub fn category(&self) -> SchemaCategory {
        self.category
    }

    /// Detailed violations
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Move every record path under `context`, e.g. `$.id` becomes `$[3].id`
    pub fn rerooted(mut self, context: &ValidationContext) -> Self {
        self.path = context.reroot(&self.path);
        for violation in &mut self.violations {
            violation.instance_path = context.reroot(&violation.instance_path);
        }
        self
    }
}

/// The fast and diagnostic engines reached different verdicts on one record
///
/// This points at a defect in a shipped schema or engine, not at the record.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error(
    "Schema engine disagreement on '{category}': {fast_engine} rejected the record \
     but {diagnostic_engine} accepted it ({fast_report})"
)]
pub struct EngineDisagreement {
    /// Schema both engines evaluated
    pub category: SchemaCategory,
    /// Engine that rejected
    pub fast_engine: String,
    /// Engine that accepted
    pub diagnostic_engine: String,
    /// What the fast engine reported
    pub fast_report: String,
}

/// Outcome of validating one record
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// The record is invalid; report it to the submitter
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// Internal fault; page an operator, never blame the record
    #[error(transparent)]
    EngineDisagreement(#[from] EngineDisagreement),
}

impl ValidationError {
    /// True for faults that are not the submitter's problem
    pub fn is_internal_fault(&self) -> bool {
        matches!(self, ValidationError::EngineDisagreement(_))
    }

    /// Borrow the record rejection, if this is one
    pub fn as_schema_error(&self) -> Option<&SchemaValidationError> {
        match self {
            ValidationError::Schema(error) => Some(error),
            ValidationError::EngineDisagreement(_) => None,
        }
    }

    /// Take the record rejection, if this is one
    pub fn into_schema_error(self) -> Option<SchemaValidationError> {
        match self {
            ValidationError::Schema(error) => Some(error),
            ValidationError::EngineDisagreement(_) => None,
        }
    }

    /// Schema that produced this outcome
    pub fn category(&self) -> SchemaCategory {
        match self {
            ValidationError::Schema(error) => error.category,
            ValidationError::EngineDisagreement(fault) => fault.category,
        }
    }

    fn rerooted(self, context: &ValidationContext) -> Self {
        match self {
            ValidationError::Schema(error) => ValidationError::Schema(error.rerooted(context)),
            fault => fault,
        }
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Multiple validation errors collected during batch validation
#[derive(Debug, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// List of validation errors
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multiple validation errors occurred:")?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create a new validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add an error found in the record at `context`
    pub fn add_at(&mut self, context: &ValidationContext, error: ValidationError) {
        self.errors.push(error.rerooted(context));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether any collected error is an internal fault
    pub fn has_internal_fault(&self) -> bool {
        self.errors.iter().any(ValidationError::is_internal_fault)
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}
