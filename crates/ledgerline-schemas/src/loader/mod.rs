//! Schema loading
//!
//! Definitions are read from the embedded assets or a schema directory,
//! parsed from YAML or JSON, stripped of descriptions and compiled into
//! both matching engines.
//!
//! # Example Usage
//!
//! ```rust
//! use ledgerline_schemas::loader::{LoaderConfig, SchemaLoader};
//! use ledgerline_schemas::SchemaCategory;
//!
//! let loader = SchemaLoader::with_config(LoaderConfig::from_env());
//! let vote = loader.load(SchemaCategory::Vote)?;
//! println!("Loaded {} from {}", vote.category(), vote.location().display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod schema_loader;
pub mod source;
pub mod strip;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use schema_loader::{LoaderConfig, SchemaLoader, SCHEMA_DIR_ENV};
pub use source::{SchemaSource, SchemaText};
pub use strip::{strip_descriptions, stripped};
