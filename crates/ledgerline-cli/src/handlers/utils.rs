//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use ledgerline_schemas::{LoaderConfig, SchemaLoader, SchemaRegistry, SchemaSource};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Build the schema registry for a command
///
/// The `--schemas-dir` flag wins over the config file, which wins over
/// `LEDGERLINE_SCHEMA_DIR`; without any of them the built-in definitions
/// are used. Returns the registry and a description of where it came from.
pub fn load_registry(
    flag: Option<&Path>,
    config: &Config,
    output: &OutputWriter,
) -> Result<(SchemaRegistry, String)> {
    let _timer = Timer::new("schema_loading");

    let loader_config = match config.schemas_dir(flag) {
        Some(dir) => LoaderConfig::with_directory(dir),
        None => LoaderConfig::from_env(),
    };
    let source = match &loader_config.source {
        SchemaSource::Embedded => "built-in definitions".to_string(),
        SchemaSource::Directory(dir) => dir.display().to_string(),
    };
    debug!(source = %source, "Loading schemas");

    let spinner = output.spinner("Loading schemas...");
    let registry = SchemaRegistry::load(&SchemaLoader::with_config(loader_config));
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok((registry?, source))
}

/// Read a JSON or YAML document, choosing the parser by extension
pub fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read input file");

    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .map_err(|e| Error::invalid_format(path, format!("not valid YAML: {}", e))),
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| Error::invalid_format(path, format!("not valid JSON: {}", e))),
        _ => Err(Error::invalid_format(
            path,
            "expected a .json, .yaml or .yml file",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_yaml_and_json() {
        let dir = tempdir().unwrap();

        let yaml = dir.path().join("vote.yml");
        fs::write(&yaml, "node_pubkey: abc\nvote:\n  is_block_valid: true\n").unwrap();
        let value = read_document(&yaml).unwrap();
        assert_eq!(value["vote"]["is_block_valid"], Value::Bool(true));

        let json = dir.path().join("votes.json");
        fs::write(&json, r#"[{"node_pubkey": "abc"}]"#).unwrap();
        assert!(read_document(&json).unwrap().is_array());
    }

    #[test]
    fn test_read_failures() {
        let dir = tempdir().unwrap();

        let missing = read_document(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(missing.exit_code(), 3);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{\"id\": ").unwrap();
        assert_eq!(read_document(&broken).unwrap_err().exit_code(), 4);

        let text = dir.path().join("records.txt");
        fs::write(&text, "{}").unwrap();
        assert_eq!(read_document(&text).unwrap_err().exit_code(), 4);
    }
}
