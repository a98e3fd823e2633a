//! Schema categories known to the ledger
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of record shapes the ledger validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaCategory {
    /// Constraints shared by every transaction operation
    TransactionCommon,
    /// Extra constraints for CREATE (and GENESIS) transactions
    TransactionCreate,
    /// Extra constraints for TRANSFER transactions
    TransactionTransfer,
    /// Votes cast by nodes on blocks
    Vote,
}

/// Error returned when parsing an unknown category name
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown schema category '{0}'")]
pub struct UnknownCategory(pub String);

impl SchemaCategory {
    /// Every category, in load order
    pub const ALL: [SchemaCategory; 4] = [
        SchemaCategory::TransactionCommon,
        SchemaCategory::TransactionCreate,
        SchemaCategory::TransactionTransfer,
        SchemaCategory::Vote,
    ];

    /// Canonical category name, e.g. `transaction-common`
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaCategory::TransactionCommon => "transaction-common",
            SchemaCategory::TransactionCreate => "transaction-create",
            SchemaCategory::TransactionTransfer => "transaction-transfer",
            SchemaCategory::Vote => "vote",
        }
    }

    /// Stable name of the persisted definition, without extension
    pub fn asset_name(&self) -> &'static str {
        match self {
            SchemaCategory::TransactionCommon => "transaction",
            SchemaCategory::TransactionCreate => "transaction_create",
            SchemaCategory::TransactionTransfer => "transaction_transfer",
            SchemaCategory::Vote => "vote",
        }
    }

    /// Look up a category by its asset name
    pub fn from_asset_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.asset_name() == name)
    }

    /// Whether this category applies to transactions
    pub fn is_transaction(&self) -> bool {
        !matches!(self, SchemaCategory::Vote)
    }
}

impl fmt::Display for SchemaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaCategory {
    type Err = UnknownCategory;

    /// Accepts both canonical names and asset names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.asset_name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
