//! Removal of `description` annotations from schema trees
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

/// Remove `description` from a schema node and, recursively, from every
/// schema under `properties`, `definitions` and `anyOf`
///
/// Only schema positions are visited: a property that happens to be named
/// `description` is left alone. Non-object nodes are ignored.
pub fn strip_descriptions(node: &mut Value) {
    let Value::Object(map) = node else {
        return;
    };

    map.remove("description");

    for key in ["properties", "definitions"] {
        if let Some(Value::Object(children)) = map.get_mut(key) {
            children.values_mut().for_each(strip_descriptions);
        }
    }
    if let Some(Value::Array(branches)) = map.get_mut("anyOf") {
        branches.iter_mut().for_each(strip_descriptions);
    }
}

/// Owned variant of [`strip_descriptions`]
pub fn stripped(mut tree: Value) -> Value {
    strip_descriptions(&mut tree);
    tree
}
