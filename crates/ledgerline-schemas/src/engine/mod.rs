//! Schema matching engines
//!
//! Two engines evaluate every schema:
//! - **compiled**: an arena of pre-resolved nodes that only answers yes/no,
//!   used on every record
//! - **jsonschema**: the reference validator, used only to explain rejections
//!
//! Both sit behind [`SchemaMatcher`] so either can be swapped out without
//! touching the dual validator.
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

pub mod compiled;
pub mod diagnostic;

pub use compiled::{compile, CompileError, CompiledSchema};
pub use diagnostic::DiagnosticSchema;

use crate::validation::error::Violation;
use serde_json::Value;

/// Capability shared by every schema engine
pub trait SchemaMatcher: Send + Sync {
    /// Short engine name used in logs and fault reports
    fn engine(&self) -> &'static str;

    /// Whether the record conforms to the schema
    fn is_match(&self, record: &Value) -> bool;

    /// Why the record does not conform; empty when it does
    fn violations(&self, record: &Value) -> Vec<Violation> {
        if self.is_match(record) {
            Vec::new()
        } else {
            vec![Violation::new(
                "$",
                "#",
                format!("record rejected by the {} engine", self.engine()),
            )]
        }
    }
}
