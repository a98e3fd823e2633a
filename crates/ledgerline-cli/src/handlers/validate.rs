//! Validation command handler

use super::utils::{load_registry, read_document};
use crate::cli::{KindArg, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ValidationReport};
use ledgerline_schemas::{
    validate_transaction, validate_transactions_batch, validate_vote, validate_votes_batch,
    RecordKind, SchemaRegistry, ValidationConfig, ValidationError,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

/// Handle the validate command
#[instrument(skip_all, fields(file = %args.file.display(), kind = ?args.kind))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("validate_command", &format!("file: {}", args.file.display()));
    info!("Starting validation");

    let document = read_document(&args.file)?;
    let (registry, _) = load_registry(args.schemas_dir.as_deref(), config, output)?;

    let validation_config = ValidationConfig::new().with_max_errors(args.max_errors);
    let validation_config = if args.fail_fast {
        validation_config.with_fail_fast()
    } else {
        validation_config
    };

    let report = validate_document(
        &registry,
        document,
        args.kind,
        &validation_config,
        args.file.display().to_string(),
    );
    output.validation_report(&report)?;

    if let Some(fault) = report.fault() {
        error!(error = %fault, "Validation aborted by an internal fault");
        return Err(Error::EngineDisagreement(fault.to_string()));
    }
    if !report.valid {
        warn!(rejected = report.rejected(), records = report.records, "Records rejected");
        return Err(Error::Rejected {
            rejected: report.rejected(),
            total: report.records,
        });
    }

    info!(
        records = report.records,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "All records valid"
    );
    Ok(())
}

/// Validate one record or an array of records
///
/// With `KindArg::Auto` the kind is detected from the first record and
/// applied to the whole array.
pub fn validate_document(
    registry: &SchemaRegistry,
    document: Value,
    kind: KindArg,
    config: &ValidationConfig,
    file: String,
) -> ValidationReport {
    let (records, batch) = match document {
        Value::Array(records) => (records, true),
        record => (vec![record], false),
    };

    let kind = match kind {
        KindArg::Transaction => RecordKind::Transaction,
        KindArg::Vote => RecordKind::Vote,
        KindArg::Auto => records
            .first()
            .map(RecordKind::detect)
            .unwrap_or(RecordKind::Transaction),
    };
    debug!(?kind, records = records.len(), batch, "Validating records");

    let errors: Vec<ValidationError> = if batch {
        let outcome = match kind {
            RecordKind::Transaction => validate_transactions_batch(registry, &records, config),
            RecordKind::Vote => validate_votes_batch(registry, &records, config),
        };
        outcome.err().map(|errors| errors.errors).unwrap_or_default()
    } else {
        let outcome = match kind {
            RecordKind::Transaction => validate_transaction(registry, &records[0]),
            RecordKind::Vote => validate_vote(registry, &records[0]),
        };
        outcome.err().into_iter().collect()
    };

    ValidationReport {
        file,
        kind,
        records: records.len(),
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::OnceLock;

    const PUBLIC_KEY: &str = "4py8JuSQkR8zGjxMpSmNnyYKgWwbBSKApd8WhpLEt3Uz";
    const SIGNATURE: &str = "2GWgAf6W3QFHmMHmkmDhjebPLfG3q7Lqu8cJZPZZNTpZ";

    fn registry() -> &'static SchemaRegistry {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| SchemaRegistry::embedded().unwrap())
    }

    fn vote() -> Value {
        json!({
            "node_pubkey": PUBLIC_KEY,
            "signature": SIGNATURE,
            "vote": {
                "voting_for_block": "90fa8afb85127f76397c4e8dc6c47bb035dbed102359b4d5fc45523179c2d80d",
                "previous_block": "c8e6ca54786c93d7dead7132e40ad2404899669c424479ba85959e4fcbbcecf4",
                "is_block_valid": true,
                "invalid_reason": null,
                "timestamp": "1509977988"
            }
        })
    }

    fn check(document: Value, kind: KindArg, config: &ValidationConfig) -> ValidationReport {
        validate_document(registry(), document, kind, config, "test.json".to_string())
    }

    #[test]
    fn test_single_vote_auto_detected() {
        let report = check(vote(), KindArg::Auto, &ValidationConfig::new());
        assert_eq!(report.kind, RecordKind::Vote);
        assert_eq!(report.records, 1);
        assert!(report.valid, "{:?}", report.errors);
    }

    #[test]
    fn test_single_rejection_keeps_record_paths() {
        let mut record = vote();
        record["vote"]["timestamp"] = json!(1509977988);

        let report = check(record, KindArg::Vote, &ValidationConfig::new());
        assert!(!report.valid);
        assert_eq!(report.rejected(), 1);
        assert_eq!(report.errors[0].as_schema_error().unwrap().path(), "$.vote.timestamp");
    }

    #[test]
    fn test_array_reports_indices() {
        let document = json!([vote(), {"vote": {}}, vote()]);

        let report = check(document, KindArg::Auto, &ValidationConfig::new());
        assert_eq!(report.records, 3);
        assert_eq!(report.rejected(), 1);
        assert!(report.errors[0].as_schema_error().unwrap().path().starts_with("$[1]"));
        assert!(report.fault().is_none());
    }

    #[test]
    fn test_fail_fast_and_limits() {
        let document = json!([{}, {}, {}, vote()]);

        let all = check(document.clone(), KindArg::Vote, &ValidationConfig::new());
        assert_eq!(all.rejected(), 3);

        let first = check(document.clone(), KindArg::Vote, &ValidationConfig::new().with_fail_fast());
        assert_eq!(first.rejected(), 1);

        let capped = check(document, KindArg::Vote, &ValidationConfig::new().with_max_errors(2));
        assert_eq!(capped.rejected(), 2);
    }

    #[test]
    fn test_forced_kind_wins_over_detection() {
        let report = check(vote(), KindArg::Transaction, &ValidationConfig::new());
        assert_eq!(report.kind, RecordKind::Transaction);
        assert!(!report.valid);
    }

    #[test]
    fn test_empty_array_is_valid() {
        let report = check(json!([]), KindArg::Auto, &ValidationConfig::new());
        assert_eq!(report.records, 0);
        assert_eq!(report.kind, RecordKind::Transaction);
        assert!(report.valid);
    }
}
