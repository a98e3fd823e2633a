//! Error types for schema loading operations
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::category::SchemaCategory;
use crate::engine::CompileError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Everything that can go wrong while turning a schema definition into a `Schema`
///
/// All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// No definition for a category in the schema directory
    #[error("No '{category}' schema in '{dir}' (looked for {asset}.yaml, {asset}.yml, {asset}.json)")]
    SchemaNotFound {
        category: SchemaCategory,
        asset: &'static str,
        dir: PathBuf,
    },

    /// The compiled engine cannot represent the schema
    #[error("Failed to compile schema '{path}': {source}")]
    Compile {
        path: PathBuf,
        source: CompileError,
    },

    /// The diagnostic engine rejects the tree as a schema
    #[error("Failed to build diagnostic validator for '{path}': {reason}")]
    DiagnosticBuild { path: PathBuf, reason: String },

    /// Generic validation errors
    #[error("Validation failed for '{path}': {reason}")]
    ValidationError { path: PathBuf, reason: String },

    /// A registry was assembled without every category
    #[error("Schema registry is missing the '{category}' schema")]
    MissingSchema { category: SchemaCategory },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a validation error
    pub fn validation_error(path: PathBuf, reason: String) -> Self {
        Self::ValidationError { path, reason }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            Self::SchemaNotFound { dir, .. } => Some(dir),
            Self::Compile { path, .. } => Some(path),
            Self::DiagnosticBuild { path, .. } => Some(path),
            Self::ValidationError { path, .. } => Some(path),
            Self::MissingSchema { .. } => None,
        }
    }
}
