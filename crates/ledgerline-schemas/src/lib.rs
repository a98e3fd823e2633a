//! Ledgerline Schemas - schema validation for ledger transactions and votes
//!
//! Inbound records are checked against declarative schema definitions before
//! they enter the ledger's processing pipeline. Validation is designed to run
//! on every record:
//!
//! - **Compiled engine**: every schema is compiled once into an arena of
//!   nodes with references and patterns pre-resolved; it answers yes/no
//! - **Diagnostic engine**: the `jsonschema` validator runs only on records
//!   the compiled engine rejects, to explain exactly what is wrong
//! - **Engine disagreement**: if the diagnostic engine accepts what the
//!   compiled engine rejected, the result is an internal fault and is never
//!   reported as an invalid record
//!
//! ## Quick Start
//!
//! ```rust
//! use ledgerline_schemas::{SchemaRegistry, ValidationError};
//! use serde_json::json;
//!
//! // Load the embedded schemas once at startup
//! let registry = SchemaRegistry::embedded().unwrap();
//!
//! let vote = json!({
//!     "node_pubkey": "4py8JuSQkR8zGjxMpSmNnyYKgWwbBSKApd8WhpLEt3Uz",
//!     "signature": "2GWgAf6W3QFHmMHmkmDhjebPLfG3q7Lqu8cJZPZZNTpZ",
//! });
//!
//! match registry.validate_vote(&vote) {
//!     Ok(()) => println!("Valid vote"),
//!     Err(ValidationError::Schema(e)) => println!("Rejected: {}", e.message()),
//!     Err(fault) => eprintln!("Internal fault: {}", fault),
//! }
//! ```
//!
//! ## Schema Categories
//!
//! - `transaction-common`: constraints shared by every transaction
//! - `transaction-create`: CREATE and GENESIS specific constraints
//! - `transaction-transfer`: TRANSFER specific constraints
//! - `vote`: votes cast on blocks
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

pub mod category;
pub mod engine;
pub mod loader;
pub mod registry;
pub mod resolver;
pub mod validation;

// Re-export commonly used types for convenience
pub use category::{SchemaCategory, UnknownCategory};
pub use engine::{CompileError, SchemaMatcher};
pub use loader::{LoaderConfig, LoaderError, LoaderResult, SchemaLoader, SchemaSource};
pub use registry::{Schema, SchemaRegistry, SchemaRegistryBuilder};
pub use resolver::{resolve_transaction_variant, RecordKind};
pub use validation::{
    validate_transaction, validate_transactions_batch, validate_vote, validate_votes_batch,
    DualValidator, EngineDisagreement, SchemaValidationError, ValidationConfig,
    ValidationContext, ValidationError, ValidationErrors, ValidationResult, Violation,
};
