//! Errors raised while compiling a schema tree
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// A schema tree the compiled engine cannot represent faithfully
#[derive(Error, Debug)]
pub enum CompileError {
    /// Keyword outside the supported vocabulary
    #[error("Unsupported keyword '{keyword}' at '{pointer}'")]
    UnsupportedKeyword { keyword: String, pointer: String },

    /// Keyword with a malformed value
    #[error("Invalid value for '{keyword}' at '{pointer}': {reason}")]
    InvalidKeyword {
        keyword: String,
        pointer: String,
        reason: String,
    },

    /// Regular expression that does not compile
    #[error("Invalid pattern '{pattern}' at '{pointer}': {source}")]
    InvalidPattern {
        pattern: String,
        pointer: String,
        source: regex::Error,
    },

    /// `$ref` pointing outside the local definitions
    #[error("Unresolved reference '{reference}' at '{pointer}'")]
    UnresolvedReference { reference: String, pointer: String },

    /// `$schema` naming a draft other than draft-07
    #[error("Unsupported schema dialect '{dialect}'")]
    UnsupportedDialect { dialect: String },

    /// Node that is neither an object nor a boolean
    #[error("Schema at '{pointer}' must be an object or a boolean")]
    InvalidSchema { pointer: String },
}

impl CompileError {
    pub(crate) fn invalid_keyword(keyword: &str, pointer: &str, reason: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.to_string(),
            pointer: pointer.to_string(),
            reason: reason.into(),
        }
    }

    /// Schema pointer the error refers to, if any
    pub fn pointer(&self) -> Option<&str> {
        match self {
            Self::UnsupportedKeyword { pointer, .. }
            | Self::InvalidKeyword { pointer, .. }
            | Self::InvalidPattern { pointer, .. }
            | Self::UnresolvedReference { pointer, .. }
            | Self::InvalidSchema { pointer } => Some(pointer),
            Self::UnsupportedDialect { .. } => None,
        }
    }
}
