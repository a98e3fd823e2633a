//! Schema inspection command handlers

use super::utils::load_registry;
use crate::cli::{SchemasAction, SchemasArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::{OutputWriter, SchemaEntry, SchemaReport};
use ledgerline_schemas::SchemaRegistry;
use tracing::{info, instrument};

/// Handle the schemas command
#[instrument(skip_all, fields(action = ?args.action))]
pub fn handle_schemas(args: SchemasArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        SchemasAction::Check { schemas_dir } => {
            let (registry, source) = load_registry(schemas_dir.as_deref(), config, output)?;
            let report = schema_report(&registry, source);
            info!(source = %report.source, "All schemas compiled");
            output.schema_report(&report)
        }
        SchemasAction::Show {
            category,
            schemas_dir,
        } => {
            let (registry, _) = load_registry(schemas_dir.as_deref(), config, output)?;
            output.data(registry.get(category).tree())
        }
    }
}

/// Summarize every schema in the registry
pub fn schema_report(registry: &SchemaRegistry, source: String) -> SchemaReport {
    SchemaReport {
        source,
        schemas: registry
            .schemas()
            .map(|schema| SchemaEntry {
                category: schema.category(),
                title: schema.title().map(str::to_string),
                location: schema.location().display().to_string(),
            })
            .collect(),
    }
}
