//! Configuration management for the CLI
//!
//! Configuration comes from, in order of precedence:
//! - Command-line arguments
//! - The file named by `--config` / `LEDGERLINE_CONFIG`
//! - `.ledgerline.{yaml,json}` in the working directory, the user config
//!   directory, or the home directory
//! - Default values

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding schema definitions; built-in schemas when unset
    pub schemas_dir: Option<PathBuf>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level when no `-v` flag is given (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?
        };

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        match Self::default_config_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if !path.exists() => Err(Error::config(format!(
                "config file {} does not exist",
                path.display()
            ))),
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Default configuration file paths, in lookup order
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".ledgerline.yaml"),
            PathBuf::from(".ledgerline.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let ledgerline_dir = config_dir.join("ledgerline");
            paths.push(ledgerline_dir.join("config.yaml"));
            paths.push(ledgerline_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".ledgerline.yaml"));
            paths.push(home_dir.join(".ledgerline.json"));
        }

        paths
    }

    /// Schema directory to use: the command's flag wins over the file
    pub fn schemas_dir<'a>(&'a self, flag: Option<&'a Path>) -> Option<&'a Path> {
        flag.or(self.schemas_dir.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledgerline.yaml");
        fs::write(
            &path,
            "schemas_dir: /etc/ledgerline/schemas\noutput:\n  format: json-pretty\n  color: false\nlogging:\n  level: debug\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.schemas_dir, Some(PathBuf::from("/etc/ledgerline/schemas")));
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(!config.output.color);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.logging.format.is_none());
    }

    #[test]
    fn test_json_config_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledgerline.json");
        fs::write(&path, r#"{"output": {"format": "yaml"}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.output.color);
        assert!(config.schemas_dir.is_none());
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledgerline.yaml");
        fs::write(&path, "schema_dir: ./schemas\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let err = Config::load_with_file(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_schemas_dir_precedence() {
        let config = Config {
            schemas_dir: Some(PathBuf::from("from-file")),
            ..Config::default()
        };
        assert_eq!(config.schemas_dir(None), Some(Path::new("from-file")));
        assert_eq!(
            config.schemas_dir(Some(Path::new("from-flag"))),
            Some(Path::new("from-flag"))
        );
        assert_eq!(Config::default().schemas_dir(None), None);
    }
}
