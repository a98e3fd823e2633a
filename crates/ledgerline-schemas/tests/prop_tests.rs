//! Property-based tests for the validation engines
//!
//! The compiled and diagnostic engines must agree on every record, for every
//! shipped schema, whether the diagnostic engine is built from the stripped
//! tree or from the definition as written.

mod common;

use ledgerline_schemas::engine::{compile, CompiledSchema, DiagnosticSchema};
use ledgerline_schemas::loader::{strip_descriptions, stripped, SchemaLoader};
use ledgerline_schemas::{
    resolve_transaction_variant, validate_transaction, SchemaCategory, SchemaMatcher,
    SchemaRegistry,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

/// Per category: compiled engine, diagnostic from stripped tree, diagnostic from raw tree
struct Engines {
    category: SchemaCategory,
    compiled: CompiledSchema,
    stripped: DiagnosticSchema,
    raw: DiagnosticSchema,
}

fn engines() -> &'static [Engines] {
    static ENGINES: OnceLock<Vec<Engines>> = OnceLock::new();
    ENGINES.get_or_init(|| {
        let loader = SchemaLoader::new();
        SchemaCategory::ALL
            .into_iter()
            .map(|category| {
                let (_, raw) = loader.load_tree(category).unwrap();
                let tree = stripped(raw.clone());
                Engines {
                    category,
                    compiled: compile(&tree).unwrap(),
                    stripped: DiagnosticSchema::new(&tree).unwrap(),
                    raw: DiagnosticSchema::new(&raw).unwrap(),
                }
            })
            .collect()
    })
}

fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(common::registry)
}

fn assert_engines_agree(record: &Value) -> Result<(), TestCaseError> {
    for engines in engines() {
        let fast = engines.compiled.is_match(record);
        prop_assert_eq!(
            fast,
            engines.stripped.is_match(record),
            "{} disagrees on {}",
            engines.category,
            record
        );
        prop_assert_eq!(
            fast,
            engines.raw.is_match(record),
            "{} (unstripped) disagrees on {}",
            engines.category,
            record
        );
        // A rejection must always come with an explanation
        prop_assert_eq!(fast, engines.stripped.violations(record).is_empty());
    }
    Ok(())
}

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1000i32..1000).prop_map(|n| json!(f64::from(n) + 0.5)),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
        interesting_string(),
    ];

    leaf.prop_recursive(
        3,  // max depth
        24, // max size
        6,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map(field_name(), inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Names the schemas know about, plus noise
fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "id", "operation", "asset", "data", "inputs", "outputs", "metadata", "version",
            "fulfills", "fulfillment", "owners_before", "amount", "condition", "details", "uri",
            "public_keys", "type", "public_key", "threshold", "subconditions", "node_pubkey",
            "signature", "vote", "timestamp", "invalid_reason", "is_block_valid",
            "voting_for_block", "previous_block", "output_index", "transaction_id",
        ])
        .prop_map(str::to_string),
        "[a-z_]{1,12}",
    ]
}

/// Strings that sit near the schemas' patterns
fn interesting_string() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("CREATE")),
        Just(json!("TRANSFER")),
        Just(json!("GENESIS")),
        Just(json!("1.0")),
        Just(json!("ed25519-sha-256")),
        Just(json!("threshold-sha-256")),
        Just(json!(common::PUBLIC_KEY)),
        Just(json!(common::CREATE_ID)),
        Just(json!(common::CONDITION_URI)),
        "[0-9a-f]{63,65}".prop_map(Value::String),
        "[1-9A-HJ-NP-Za-km-z0OIl]{42,45}".prop_map(Value::String),
        "[0-9]{9,11}".prop_map(Value::String),
        "[0-9٠-٩]{10}".prop_map(Value::String),
    ]
}

fn fixture() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(common::create_transaction()),
        Just(common::transfer_transaction()),
        Just(common::vote()),
    ]
}

/// One edit applied at a node picked by `target`
#[derive(Debug, Clone)]
enum Mutation {
    Remove,
    Replace(Value),
    Insert(String, Value),
}

fn mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        Just(Mutation::Remove),
        json_value_strategy().prop_map(Mutation::Replace),
        (field_name(), json_value_strategy()).prop_map(|(k, v)| Mutation::Insert(k, v)),
    ]
}

/// JSON pointers of every node below the root
fn pointers(value: &Value, prefix: String, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let pointer = format!("{}/{}", prefix, key.replace('~', "~0").replace('/', "~1"));
                out.push(pointer.clone());
                pointers(child, pointer, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                let pointer = format!("{}/{}", prefix, i);
                out.push(pointer.clone());
                pointers(child, pointer, out);
            }
        }
        _ => {}
    }
}

fn mutate(mut record: Value, edits: &[(prop::sample::Index, Mutation)]) -> Value {
    for (target, edit) in edits {
        let mut all = Vec::new();
        pointers(&record, String::new(), &mut all);
        if all.is_empty() {
            break;
        }
        let pointer = &all[target.index(all.len())];
        let (parent, last) = pointer.rsplit_once('/').unwrap_or(("", pointer.as_str()));
        let last = last.replace("~1", "/").replace("~0", "~");

        match edit {
            Mutation::Replace(value) => {
                if let Some(slot) = record.pointer_mut(pointer) {
                    *slot = value.clone();
                }
            }
            Mutation::Remove => match record.pointer_mut(parent) {
                Some(Value::Object(map)) => {
                    map.remove(&last);
                }
                Some(Value::Array(items)) => {
                    if let Ok(i) = last.parse::<usize>() {
                        if i < items.len() {
                            items.remove(i);
                        }
                    }
                }
                _ => {}
            },
            Mutation::Insert(key, value) => {
                if let Some(Value::Object(map)) = record.pointer_mut(pointer) {
                    map.insert(key.clone(), value.clone());
                } else if let Some(Value::Object(map)) = record.pointer_mut(parent) {
                    map.insert(key.clone(), value.clone());
                }
            }
        }
    }
    record
}

/// Schema-shaped trees with descriptions in and out of schema positions
fn schema_tree_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(json!({"type": "string"})),
        Just(json!({"type": "null", "description": "nothing"})),
        "[a-z ]{0,20}".prop_map(|d| json!({"description": d, "minLength": 1})),
        Just(json!({"enum": [{"description": "data, not a schema"}]})),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            proptest::collection::hash_map("[a-z]{1,8}|description", inner.clone(), 0..4).prop_map(
                |props| json!({"type": "object", "description": "obj", "properties": props})
            ),
            proptest::collection::hash_map("[a-z]{1,8}", inner.clone(), 0..3)
                .prop_map(|defs| json!({"definitions": defs, "description": "defs"})),
            proptest::collection::vec(inner.clone(), 1..4)
                .prop_map(|branches| json!({"anyOf": branches, "description": "any"})),
            inner.prop_map(|item| json!({"type": "array", "items": item})),
        ]
    })
}

/// Every leaf of `value` with its pointer
fn leaves(value: &Value) -> Map<String, Value> {
    let mut all = Vec::new();
    pointers(value, String::new(), &mut all);
    all.into_iter()
        .filter_map(|p| {
            let node = value.pointer(&p)?;
            (!node.is_object() && !node.is_array()).then(|| (p, node.clone()))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: both engines agree on arbitrary JSON
    #[test]
    fn prop_engines_agree_on_arbitrary_json(record in json_value_strategy()) {
        assert_engines_agree(&record)?;
    }

    /// Property: both engines agree on near-valid records
    #[test]
    fn prop_engines_agree_on_mutated_records(
        base in fixture(),
        edits in proptest::collection::vec((any::<prop::sample::Index>(), mutation()), 1..4),
    ) {
        assert_engines_agree(&mutate(base, &edits))?;
    }

    /// Property: validation never panics and only a disagreement is a fault
    #[test]
    fn prop_validation_never_faults(
        base in fixture(),
        edits in proptest::collection::vec((any::<prop::sample::Index>(), mutation()), 0..3),
    ) {
        let record = mutate(base, &edits);
        if let Err(error) = validate_transaction(registry(), &record) {
            prop_assert!(!error.is_internal_fault(), "{}", error);
        }
    }

    /// Property: only an exact "TRANSFER" selects the transfer variant
    #[test]
    fn prop_variant_resolution(operation in json_value_strategy()) {
        let expected = if operation == json!("TRANSFER") {
            SchemaCategory::TransactionTransfer
        } else {
            SchemaCategory::TransactionCreate
        };
        prop_assert_eq!(resolve_transaction_variant(&json!({"operation": operation})), expected);
    }

    /// Property: stripping is idempotent
    #[test]
    fn prop_stripping_idempotent(tree in schema_tree_strategy()) {
        let once = stripped(tree);
        let mut twice = once.clone();
        strip_descriptions(&mut twice);
        prop_assert_eq!(once, twice);
    }

    /// Property: stripping only removes nodes, never alters what remains
    #[test]
    fn prop_stripping_only_removes(tree in schema_tree_strategy()) {
        let original = leaves(&tree);
        let kept = leaves(&stripped(tree));
        for (pointer, value) in &kept {
            prop_assert_eq!(Some(value), original.get(pointer));
        }
    }

    /// Property: a tree without descriptions is left untouched
    #[test]
    fn prop_stripping_without_descriptions(record in json_value_strategy()) {
        let tree = json!({"type": "object", "properties": {"field": {"enum": [record]}}});
        prop_assert_eq!(stripped(tree.clone()), tree);
    }
}
