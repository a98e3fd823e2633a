//! Loaded schemas and the registry that holds them
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use crate::category::SchemaCategory;
use crate::engine::{compile, DiagnosticSchema, SchemaMatcher};
use crate::loader::{LoaderConfig, LoaderError, LoaderResult, SchemaLoader};
use crate::validation::{self, dual::DualValidator, ValidationResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// One category's schema with both of its matchers
///
/// The fast and diagnostic matchers are built from the same stripped tree and
/// must accept exactly the same records.
#[derive(Clone)]
pub struct Schema {
    category: SchemaCategory,
    location: PathBuf,
    tree: Arc<Value>,
    fast: Arc<dyn SchemaMatcher>,
    diagnostic: Arc<dyn SchemaMatcher>,
}

impl Schema {
    /// Build both engines from a (stripped) schema tree
    pub fn from_tree(category: SchemaCategory, location: PathBuf, tree: Value) -> LoaderResult<Self> {
        let fast = compile(&tree).map_err(|source| LoaderError::Compile {
            path: location.clone(),
            source,
        })?;
        let diagnostic = DiagnosticSchema::new(&tree).map_err(|reason| LoaderError::DiagnosticBuild {
            path: location.clone(),
            reason,
        })?;

        Ok(Self::with_matchers(
            category,
            location,
            tree,
            Arc::new(fast),
            Arc::new(diagnostic),
        ))
    }

    /// Assemble a schema from explicit matchers
    pub fn with_matchers(
        category: SchemaCategory,
        location: PathBuf,
        tree: Value,
        fast: Arc<dyn SchemaMatcher>,
        diagnostic: Arc<dyn SchemaMatcher>,
    ) -> Self {
        Self {
            category,
            location,
            tree: Arc::new(tree),
            fast,
            diagnostic,
        }
    }

    pub fn category(&self) -> SchemaCategory {
        self.category
    }

    /// Where the definition was read from
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Stripped declarative tree
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// `title` of the definition, if any
    pub fn title(&self) -> Option<&str> {
        self.tree.get("title").and_then(Value::as_str)
    }

    pub fn fast(&self) -> &dyn SchemaMatcher {
        self.fast.as_ref()
    }

    pub fn diagnostic(&self) -> &dyn SchemaMatcher {
        self.diagnostic.as_ref()
    }

    /// Validate one record against this schema alone
    pub fn validate(&self, record: &Value) -> ValidationResult<()> {
        DualValidator::new(self).validate(record)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("category", &self.category)
            .field("location", &self.location)
            .field("fast", &self.fast.engine())
            .field("diagnostic", &self.diagnostic.engine())
            .finish()
    }
}

/// Every schema the ledger validates against
///
/// Built once at startup and shared by reference; lookups cannot fail.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    transaction_common: Schema,
    transaction_create: Schema,
    transaction_transfer: Schema,
    vote: Schema,
}

impl SchemaRegistry {
    /// Load every category through `loader`
    pub fn load(loader: &SchemaLoader) -> LoaderResult<Self> {
        let registry = Self {
            transaction_common: loader.load(SchemaCategory::TransactionCommon)?,
            transaction_create: loader.load(SchemaCategory::TransactionCreate)?,
            transaction_transfer: loader.load(SchemaCategory::TransactionTransfer)?,
            vote: loader.load(SchemaCategory::Vote)?,
        };

        info!(
            source = %loader.config().source.describe(),
            schemas = SchemaCategory::ALL.len(),
            "Schema registry ready"
        );

        Ok(registry)
    }

    /// Registry over the definitions compiled into the binary
    pub fn embedded() -> LoaderResult<Self> {
        Self::load(&SchemaLoader::new())
    }

    /// Registry over `<asset>.{yaml,yml,json}` files in `dir`
    pub fn from_dir(dir: impl Into<PathBuf>) -> LoaderResult<Self> {
        Self::load(&SchemaLoader::with_config(LoaderConfig::with_directory(dir)))
    }

    /// Assemble a registry from prebuilt schemas
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    pub fn get(&self, category: SchemaCategory) -> &Schema {
        match category {
            SchemaCategory::TransactionCommon => &self.transaction_common,
            SchemaCategory::TransactionCreate => &self.transaction_create,
            SchemaCategory::TransactionTransfer => &self.transaction_transfer,
            SchemaCategory::Vote => &self.vote,
        }
    }

    /// Every schema, in category order
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        SchemaCategory::ALL.into_iter().map(move |category| self.get(category))
    }

    /// See [`validation::validate_transaction`]
    pub fn validate_transaction(&self, record: &Value) -> ValidationResult<()> {
        validation::validate_transaction(self, record)
    }

    /// See [`validation::validate_vote`]
    pub fn validate_vote(&self, record: &Value) -> ValidationResult<()> {
        validation::validate_vote(self, record)
    }
}

/// Builder for [`SchemaRegistry`]
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: HashMap<SchemaCategory, Schema>,
}

impl SchemaRegistryBuilder {
    /// Add or replace the schema for its category
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schemas.insert(schema.category(), schema);
        self
    }

    /// Fails with [`LoaderError::MissingSchema`] if any category is absent
    pub fn build(mut self) -> LoaderResult<SchemaRegistry> {
        let mut take = |category| {
            self.schemas
                .remove(&category)
                .ok_or(LoaderError::MissingSchema { category })
        };

        Ok(SchemaRegistry {
            transaction_common: take(SchemaCategory::TransactionCommon)?,
            transaction_create: take(SchemaCategory::TransactionCreate)?,
            transaction_transfer: take(SchemaCategory::TransactionTransfer)?,
            vote: take(SchemaCategory::Vote)?,
        })
    }
}
