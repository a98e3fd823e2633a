//! Shared record fixtures for integration tests

#![allow(dead_code)]

use ledgerline_schemas::SchemaRegistry;
use serde_json::{json, Value};

pub const PUBLIC_KEY: &str = "4py8JuSQkR8zGjxMpSmNnyYKgWwbBSKApd8WhpLEt3Uz";
pub const OTHER_PUBLIC_KEY: &str = "JEAkEJqLbbgDRAtMm8YAjGp759Aq2qTn9eaEHUj2XePE";
pub const SIGNATURE: &str = "2GWgAf6W3QFHmMHmkmDhjebPLfG3q7Lqu8cJZPZZNTpZ";

pub const CREATE_ID: &str = "8e28fe199457a6b0e613f92732c3a56244d2b596424e0ee28c3fa5da6654d629";
pub const TRANSFER_ID: &str = "92988c2318bb902023512092cab76c1aa0c77a79ad69de6e6d4f414cf93c75a3";
pub const BLOCK_ID: &str = "90fa8afb85127f76397c4e8dc6c47bb035dbed102359b4d5fc45523179c2d80d";
pub const PREVIOUS_BLOCK_ID: &str = "c8e6ca54786c93d7dead7132e40ad2404899669c424479ba85959e4fcbbcecf4";

pub const CONDITION_URI: &str = "ni:///sha-256;pGSAIDE5i63cn4X8T8N1sZ2mGkJD5lNRnBM4PZgI_zvzbr-cgQcpVsDHbWnN7zIPlIw?fpt=ed25519-sha-256&cost=131072";
pub const FULFILLMENT: &str = "pGSAIDE5i63cn4X8T8N1sZ2mGkJD5lNRnBM4PZgI_zvzbr-cgQcpVsDHbWnN7zIPlIw";

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::embedded().expect("embedded schemas load")
}

pub fn ed25519_details(public_key: &str) -> Value {
    json!({"type": "ed25519-sha-256", "public_key": public_key})
}

pub fn output(public_key: &str, amount: &str) -> Value {
    json!({
        "amount": amount,
        "condition": {"details": ed25519_details(public_key), "uri": CONDITION_URI},
        "public_keys": [public_key]
    })
}

pub fn create_transaction() -> Value {
    json!({
        "id": CREATE_ID,
        "operation": "CREATE",
        "version": "1.0",
        "asset": {"data": {"serial": "LL-0001", "kind": "bond"}},
        "metadata": {"note": "first issuance"},
        "inputs": [{
            "owners_before": [PUBLIC_KEY],
            "fulfillment": FULFILLMENT,
            "fulfills": null
        }],
        "outputs": [output(PUBLIC_KEY, "100")]
    })
}

pub fn transfer_transaction() -> Value {
    json!({
        "id": TRANSFER_ID,
        "operation": "TRANSFER",
        "version": "1.0",
        "asset": {"id": CREATE_ID},
        "metadata": null,
        "inputs": [{
            "owners_before": [PUBLIC_KEY],
            "fulfillment": FULFILLMENT,
            "fulfills": {"output_index": 0, "transaction_id": CREATE_ID}
        }],
        "outputs": [output(OTHER_PUBLIC_KEY, "60"), output(PUBLIC_KEY, "40")]
    })
}

pub fn vote() -> Value {
    json!({
        "node_pubkey": PUBLIC_KEY,
        "signature": SIGNATURE,
        "vote": {
            "voting_for_block": BLOCK_ID,
            "previous_block": PREVIOUS_BLOCK_ID,
            "is_block_valid": true,
            "invalid_reason": null,
            "timestamp": "1509977988"
        }
    })
}
