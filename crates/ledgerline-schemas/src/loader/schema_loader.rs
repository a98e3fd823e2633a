//! Schema loader: definition text to ready-to-use `Schema`
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::category::SchemaCategory;
use crate::loader::{
    error::LoaderResult,
    parser::SchemaParser,
    source::SchemaSource,
    strip::stripped,
};
use crate::registry::Schema;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable naming a directory that overrides the embedded schemas
pub const SCHEMA_DIR_ENV: &str = "LEDGERLINE_SCHEMA_DIR";

/// Configuration for schema loader behavior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Where definitions are read from
    pub source: SchemaSource,
}

impl LoaderConfig {
    /// Embedded definitions, unless `LEDGERLINE_SCHEMA_DIR` names a directory
    pub fn from_env() -> Self {
        match std::env::var_os(SCHEMA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::with_directory(dir),
            _ => Self::default(),
        }
    }

    /// Read definitions from `dir`
    pub fn with_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: SchemaSource::Directory(dir.into()),
        }
    }
}

/// Reads, parses, strips and compiles schema definitions
#[derive(Debug, Default)]
pub struct SchemaLoader {
    config: LoaderConfig,
    parser: SchemaParser,
}

impl SchemaLoader {
    /// Create a loader for the embedded definitions
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            parser: SchemaParser::new(),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parse a category's definition as written, descriptions included
    pub fn load_tree(&self, category: SchemaCategory) -> LoaderResult<(PathBuf, Value)> {
        let text = self.config.source.read(category)?;
        let tree = self
            .parser
            .parse_content(&text.content, text.format, &text.location)?;
        self.parser.validate_basic_structure(&tree, &text.location)?;
        Ok((text.location, tree))
    }

    /// Load a category's schema with both engines built from the stripped tree
    pub fn load(&self, category: SchemaCategory) -> LoaderResult<Schema> {
        let (location, tree) = self.load_tree(category)?;
        let schema = Schema::from_tree(category, location, stripped(tree))?;

        debug!(
            category = %category,
            location = %schema.location().display(),
            source = %self.config.source.describe(),
            "Loaded schema"
        );

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::error::LoaderError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_embedded_strips_descriptions() {
        let loader = SchemaLoader::new();
        let (_, raw) = loader.load_tree(SchemaCategory::TransactionCommon).unwrap();
        assert!(raw.get("description").is_some());

        let schema = loader.load(SchemaCategory::TransactionCommon).unwrap();
        assert!(schema.tree().get("description").is_none());
        assert_eq!(schema.tree()["required"], raw["required"]);
    }

    #[test]
    fn test_load_rejects_non_mapping_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vote.yaml"), "- type\n- object\n").unwrap();

        let loader = SchemaLoader::with_config(LoaderConfig::with_directory(dir.path()));
        let err = loader.load(SchemaCategory::Vote).unwrap_err();
        assert!(matches!(err, LoaderError::ValidationError { .. }));
    }

    #[test]
    fn test_with_directory() {
        let config = LoaderConfig::with_directory("/srv/schemas");
        assert_eq!(config.source, SchemaSource::Directory(PathBuf::from("/srv/schemas")));
        assert_eq!(LoaderConfig::default().source, SchemaSource::Embedded);
    }
}
