//! Error types and handling for the CLI
//!
//! Every failure maps to a distinct process exit code so scripts can tell a
//! rejected record from a broken installation.

use ledgerline_schemas::LoaderError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// One or more records failed validation
    #[error("{rejected} of {total} record(s) rejected")]
    Rejected { rejected: usize, total: usize },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: {}", path.display(), reason)]
    InvalidFormat { path: PathBuf, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema definitions could not be loaded or compiled
    #[error("Schema load failed: {0}")]
    SchemaLoad(#[from] LoaderError),

    /// The validation engines disagreed on a record
    #[error("Internal fault: {0}")]
    EngineDisagreement(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid format error
    pub fn invalid_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) | Self::Other { .. } => 1,
            Self::Rejected { .. } => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::SchemaLoad(_) => 6,
            Self::EngineDisagreement(_) => 70,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let label = match error {
        Error::EngineDisagreement(_) => "Internal fault:",
        _ => "Error:",
    };
    let body = match error {
        Error::EngineDisagreement(message) => message.clone(),
        other => other.to_string(),
    };

    if use_color {
        use colored::Colorize;
        format!("{} {}", label.red().bold(), body)
    } else {
        format!("{} {}", label, body)
    }
}
