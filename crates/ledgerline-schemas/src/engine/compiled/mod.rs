//! Compiled fast-path engine
//!
//! A schema tree is compiled once into a flat arena of [`node::Node`]s with
//! every `$ref` resolved to an index, patterns pre-built and keyword values
//! type-checked. Matching then walks the arena without allocating and stops
//! at the first failing keyword.
//!
//! Only the draft-07 vocabulary used by the bundled schemas is supported;
//! anything else is rejected at compile time rather than ignored.
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

mod compiler;
pub mod error;
mod node;

pub use compiler::compile;
pub use error::{CompileError, CompileResult};

use super::SchemaMatcher;
use node::{json_equal, Additional, ArrayRules, Node, NodeId, ObjectRules, Rules};
use serde_json::{Map, Value};

const ROOT: NodeId = 0;

/// Compiled form of one schema tree
#[derive(Debug)]
pub struct CompiledSchema {
    nodes: Vec<Node>,
}

impl CompiledSchema {
    fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    fn matches(&self, id: NodeId, value: &Value) -> bool {
        match &self.nodes[id] {
            Node::Always => true,
            Node::Never => false,
            Node::Ref(target) => self.matches(*target, value),
            Node::Rules(rules) => self.matches_rules(rules, value),
        }
    }

    fn matches_rules(&self, rules: &Rules, value: &Value) -> bool {
        if rules.types.is_some_and(|types| !types.accepts(value)) {
            return false;
        }
        if rules
            .constant
            .as_ref()
            .is_some_and(|constant| !json_equal(constant, value))
        {
            return false;
        }
        if rules
            .enumeration
            .as_ref()
            .is_some_and(|options| !options.iter().any(|option| json_equal(option, value)))
        {
            return false;
        }

        let structural = match value {
            Value::Object(map) => self.matches_object(&rules.object, map),
            Value::Array(items) => self.matches_array(&rules.array, items),
            Value::String(s) => rules.string.accepts(s),
            Value::Number(n) => rules.number.accepts(n),
            Value::Null | Value::Bool(_) => true,
        };

        structural
            && rules.all_of.iter().all(|&id| self.matches(id, value))
            && (rules.any_of.is_empty() || rules.any_of.iter().any(|&id| self.matches(id, value)))
            && (rules.one_of.is_empty()
                || rules
                    .one_of
                    .iter()
                    .filter(|&&id| self.matches(id, value))
                    .take(2)
                    .count()
                    == 1)
            && rules.not.map_or(true, |id| !self.matches(id, value))
    }

    fn matches_object(&self, rules: &ObjectRules, map: &Map<String, Value>) -> bool {
        if rules.min_properties.is_some_and(|min| map.len() < min)
            || rules.max_properties.is_some_and(|max| map.len() > max)
        {
            return false;
        }
        if !rules.required.iter().all(|key| map.contains_key(key)) {
            return false;
        }

        map.iter().all(|(key, member)| match rules.properties.get(key) {
            Some(&id) => self.matches(id, member),
            None => match rules.additional {
                Additional::Allowed => true,
                Additional::Forbidden => false,
                Additional::Schema(id) => self.matches(id, member),
            },
        })
    }

    fn matches_array(&self, rules: &ArrayRules, items: &[Value]) -> bool {
        if rules.min_items.is_some_and(|min| items.len() < min)
            || rules.max_items.is_some_and(|max| items.len() > max)
        {
            return false;
        }
        rules
            .items
            .map_or(true, |id| items.iter().all(|item| self.matches(id, item)))
    }
}

impl SchemaMatcher for CompiledSchema {
    fn engine(&self) -> &'static str {
        "compiled"
    }

    fn is_match(&self, record: &Value) -> bool {
        self.matches(ROOT, record)
    }
}
