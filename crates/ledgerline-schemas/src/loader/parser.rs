//! YAML and JSON parsing for schema definitions and record files
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }
}

/// Parser turning YAML or JSON text into a `serde_json::Value`
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse content with explicit format; `path` is only used in errors
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Non-string mapping keys fail here
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// A schema definition must be a mapping at the root
    pub fn validate_basic_structure(&self, value: &Value, path: &Path) -> LoaderResult<()> {
        if !value.is_object() {
            return Err(LoaderError::validation_error(
                path.to_path_buf(),
                "Schema must be a mapping at the root level".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("vote.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("vote.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("vote.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("vote.txt")).is_err());
        assert!(Format::from_path(Path::new("vote")).is_err());
    }

    #[test]
    fn test_yaml_parsing() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("vote.yaml");

        let yaml_content = r#"
type: object
required:
  - vote
properties:
  vote:
    type: object
    minProperties: 1
"#;
        fs::write(&file_path, yaml_content).unwrap();

        let parser = SchemaParser::new();
        let result = parser.parse_file(&file_path)?;

        assert_eq!(result["type"], "object");
        assert_eq!(result["required"], json!(["vote"]));
        assert_eq!(result["properties"]["vote"]["minProperties"], 1);

        Ok(())
    }

    #[test]
    fn test_json_parsing() -> LoaderResult<()> {
        let parser = SchemaParser::new();
        let value = parser.parse_json(r#"{"type": ["string", "null"]}"#, Path::new("t.json"))?;
        assert_eq!(value, json!({"type": ["string", "null"]}));
        Ok(())
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let parser = SchemaParser::new();
        let err = parser
            .parse_yaml("type: [object", Path::new("broken.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::YamlParseError { .. }));
        assert_eq!(err.path().unwrap(), Path::new("broken.yaml"));

        let err = parser.parse_json("{", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, LoaderError::JsonParseError { .. }));
    }

    #[test]
    fn test_basic_structure() {
        let parser = SchemaParser::new();
        let path = Path::new("schema.yaml");
        assert!(parser.validate_basic_structure(&json!({"type": "object"}), path).is_ok());
        assert!(parser.validate_basic_structure(&json!(["not", "a", "schema"]), path).is_err());
    }
}
