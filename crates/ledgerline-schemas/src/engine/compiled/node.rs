//! Compiled schema nodes
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Index of a node inside a compiled schema's arena
pub(crate) type NodeId = usize;

/// Set of JSON primitive types accepted by a `type` keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TypeSet(u8);

impl TypeSet {
    const NULL: u8 = 1;
    const BOOLEAN: u8 = 1 << 1;
    const OBJECT: u8 = 1 << 2;
    const ARRAY: u8 = 1 << 3;
    const NUMBER: u8 = 1 << 4;
    const STRING: u8 = 1 << 5;
    const INTEGER: u8 = 1 << 6;

    /// Add a type by its schema name; false for unknown names
    pub fn insert(&mut self, name: &str) -> bool {
        let bit = match name {
            "null" => Self::NULL,
            "boolean" => Self::BOOLEAN,
            "object" => Self::OBJECT,
            "array" => Self::ARRAY,
            "number" => Self::NUMBER,
            "string" => Self::STRING,
            "integer" => Self::INTEGER,
            _ => return false,
        };
        self.0 |= bit;
        true
    }

    fn has(&self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Null => self.has(Self::NULL),
            Value::Bool(_) => self.has(Self::BOOLEAN),
            Value::Object(_) => self.has(Self::OBJECT),
            Value::Array(_) => self.has(Self::ARRAY),
            Value::String(_) => self.has(Self::STRING),
            Value::Number(n) => {
                self.has(Self::NUMBER) || (self.has(Self::INTEGER) && is_integer(n))
            }
        }
    }
}

/// One entry of the arena
#[derive(Debug)]
pub(crate) enum Node {
    /// `true` schema
    Always,
    /// `false` schema, also the placeholder while a node is being built
    Never,
    /// Resolved `$ref`
    Ref(NodeId),
    /// Keyword rules
    Rules(Box<Rules>),
}

/// What to do with object members not named in `properties`
#[derive(Debug, Default)]
pub(crate) enum Additional {
    #[default]
    Allowed,
    Forbidden,
    Schema(NodeId),
}

#[derive(Debug, Default)]
pub(crate) struct ObjectRules {
    pub properties: HashMap<String, NodeId>,
    pub required: Vec<String>,
    pub additional: Additional,
    pub min_properties: Option<usize>,
    pub max_properties: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct ArrayRules {
    pub items: Option<NodeId>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct StringRules {
    pub pattern: Option<Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl StringRules {
    pub fn accepts(&self, s: &str) -> bool {
        if self.min_length.is_some() || self.max_length.is_some() {
            let length = s.chars().count();
            if self.min_length.is_some_and(|min| length < min)
                || self.max_length.is_some_and(|max| length > max)
            {
                return false;
            }
        }
        self.pattern.as_ref().map_or(true, |re| re.is_match(s))
    }
}

#[derive(Debug, Default)]
pub(crate) struct NumberRules {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl NumberRules {
    pub fn accepts(&self, n: &Number) -> bool {
        let Some(value) = n.as_f64() else {
            return false;
        };
        self.minimum.map_or(true, |min| value >= min) && self.maximum.map_or(true, |max| value <= max)
    }
}

/// Every keyword of one schema object
#[derive(Debug, Default)]
pub(crate) struct Rules {
    pub types: Option<TypeSet>,
    pub enumeration: Option<Vec<Value>>,
    pub constant: Option<Value>,
    pub object: ObjectRules,
    pub array: ArrayRules,
    pub string: StringRules,
    pub number: NumberRules,
    pub any_of: Vec<NodeId>,
    pub all_of: Vec<NodeId>,
    pub one_of: Vec<NodeId>,
    pub not: Option<NodeId>,
}

/// Draft-07 integer check: zero fractional part counts
pub(crate) fn is_integer(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

/// Equality as `enum` and `const` define it: numbers compare by value
pub(crate) fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64() == r.as_f64(),
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| json_equal(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| json_equal(a, b)))
        }
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_set() {
        let mut types = TypeSet::default();
        assert!(types.insert("integer"));
        assert!(types.insert("null"));
        assert!(!types.insert("date"));

        assert!(types.accepts(&json!(3)));
        assert!(types.accepts(&json!(3.0)));
        assert!(!types.accepts(&json!(3.5)));
        assert!(types.accepts(&Value::Null));
        assert!(!types.accepts(&json!("3")));
    }

    #[test]
    fn test_json_equal_numbers() {
        assert!(json_equal(&json!(1), &json!(1.0)));
        assert!(json_equal(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2]})));
        assert!(!json_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!json_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_string_rules_count_code_points() {
        let rules = StringRules {
            pattern: None,
            min_length: Some(2),
            max_length: Some(2),
        };
        assert!(rules.accepts("éé"));
        assert!(!rules.accepts("é"));
    }
}
