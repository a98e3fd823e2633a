//! Choosing which schema a record is checked against
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::category::SchemaCategory;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transaction field that selects the variant schema
pub const OPERATION_FIELD: &str = "operation";

/// Operation value that selects the transfer variant
pub const TRANSFER_OPERATION: &str = "TRANSFER";

/// Variant schema for a transaction
///
/// Only an exact `"TRANSFER"` selects the transfer variant. Every other
/// value, including non-strings and an absent field, selects the create
/// variant; the common schema has already constrained `operation` by then.
pub fn resolve_transaction_variant(record: &Value) -> SchemaCategory {
    match record.get(OPERATION_FIELD).and_then(Value::as_str) {
        Some(TRANSFER_OPERATION) => SchemaCategory::TransactionTransfer,
        _ => SchemaCategory::TransactionCreate,
    }
}

/// Kind of record held in an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Transaction,
    Vote,
}

impl RecordKind {
    /// Votes carry a `vote` member; anything else is treated as a transaction
    pub fn detect(record: &Value) -> Self {
        if record.get("vote").is_some() {
            RecordKind::Vote
        } else {
            RecordKind::Transaction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transfer_selects_transfer_variant() {
        assert_eq!(
            resolve_transaction_variant(&json!({"operation": "TRANSFER"})),
            SchemaCategory::TransactionTransfer
        );
    }

    #[test]
    fn test_everything_else_selects_create_variant() {
        for record in [
            json!({"operation": "CREATE"}),
            json!({"operation": "GENESIS"}),
            json!({"operation": "transfer"}),
            json!({"operation": 7}),
            json!({"operation": null}),
            json!({}),
            json!([]),
        ] {
            assert_eq!(
                resolve_transaction_variant(&record),
                SchemaCategory::TransactionCreate,
                "{record}"
            );
        }
    }

    #[test]
    fn test_detect_record_kind() {
        assert_eq!(RecordKind::detect(&json!({"vote": {}})), RecordKind::Vote);
        assert_eq!(RecordKind::detect(&json!({"operation": "CREATE"})), RecordKind::Transaction);
        assert_eq!(RecordKind::detect(&json!("vote")), RecordKind::Transaction);
    }
}
