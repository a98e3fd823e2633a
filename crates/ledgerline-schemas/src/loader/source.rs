//! Where schema definitions are read from
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::category::SchemaCategory;
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::Format;
use std::path::{Path, PathBuf};

// Embed the definitions at compile time so a binary is self-contained
const TRANSACTION_SCHEMA: &str = include_str!("../../../../schemas/transaction.yaml");
const TRANSACTION_CREATE_SCHEMA: &str = include_str!("../../../../schemas/transaction_create.yaml");
const TRANSACTION_TRANSFER_SCHEMA: &str = include_str!("../../../../schemas/transaction_transfer.yaml");
const VOTE_SCHEMA: &str = include_str!("../../../../schemas/vote.yaml");

/// Extensions tried, in order, when reading from a directory
const DIRECTORY_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Storage holding the schema definitions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SchemaSource {
    /// Definitions compiled into the binary
    #[default]
    Embedded,
    /// `<asset name>.{yaml,yml,json}` files in a directory
    Directory(PathBuf),
}

/// Raw text of one definition and where it came from
#[derive(Debug, Clone)]
pub struct SchemaText {
    pub location: PathBuf,
    pub format: Format,
    pub content: String,
}

impl SchemaSource {
    /// Read the definition for a category
    pub fn read(&self, category: SchemaCategory) -> LoaderResult<SchemaText> {
        match self {
            SchemaSource::Embedded => Ok(SchemaText {
                location: Path::new("schemas").join(format!("{}.yaml", category.asset_name())),
                format: Format::Yaml,
                content: embedded(category).to_string(),
            }),
            SchemaSource::Directory(dir) => read_from_dir(dir, category),
        }
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            SchemaSource::Embedded => "embedded".to_string(),
            SchemaSource::Directory(dir) => dir.display().to_string(),
        }
    }
}

fn embedded(category: SchemaCategory) -> &'static str {
    match category {
        SchemaCategory::TransactionCommon => TRANSACTION_SCHEMA,
        SchemaCategory::TransactionCreate => TRANSACTION_CREATE_SCHEMA,
        SchemaCategory::TransactionTransfer => TRANSACTION_TRANSFER_SCHEMA,
        SchemaCategory::Vote => VOTE_SCHEMA,
    }
}

fn read_from_dir(dir: &Path, category: SchemaCategory) -> LoaderResult<SchemaText> {
    let asset = category.asset_name();
    let location = DIRECTORY_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", asset, ext)))
        .find(|path| path.is_file())
        .ok_or_else(|| LoaderError::SchemaNotFound {
            category,
            asset,
            dir: dir.to_path_buf(),
        })?;

    let format = Format::from_path(&location)?;
    let content = std::fs::read_to_string(&location)
        .map_err(|e| LoaderError::io_error(location.clone(), e))?;

    Ok(SchemaText {
        location,
        format,
        content,
    })
}
