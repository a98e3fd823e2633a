//! Validation demonstration example
//!
//! Copyright (c) 2025 Ledgerline Team
//! Licensed under the Apache-2.0 license

use ledgerline_schemas::{
    validate_votes_batch, SchemaRegistry, ValidationConfig, ValidationError,
};
use serde_json::{json, Value};

const PUBLIC_KEY: &str = "4py8JuSQkR8zGjxMpSmNnyYKgWwbBSKApd8WhpLEt3Uz";
const BLOCK_ID: &str = "90fa8afb85127f76397c4e8dc6c47bb035dbed102359b4d5fc45523179c2d80d";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Ledgerline Schema Validation Demo ===\n");

    let registry = SchemaRegistry::embedded()?;
    for schema in registry.schemas() {
        println!(
            "Loaded {:<22} {}",
            schema.category(),
            schema.title().unwrap_or("(untitled)")
        );
    }
    println!();

    demo_transaction_validation(&registry);
    println!();
    demo_vote_batch(&registry);

    Ok(())
}

fn report(label: &str, result: Result<(), ValidationError>) {
    println!("{}:", label);
    match result {
        Ok(()) => println!("   Valid!"),
        Err(ValidationError::Schema(e)) => {
            println!("   Rejected by {} at {}", e.category(), e.path());
            for violation in e.violations() {
                println!("   - {}", violation);
            }
        }
        Err(fault) => println!("   INTERNAL FAULT: {}", fault),
    }
}

fn demo_transaction_validation(registry: &SchemaRegistry) {
    println!("--- Transaction Validation ---");

    let transfer = json!({
        "id": "92988c2318bb902023512092cab76c1aa0c77a79ad69de6e6d4f414cf93c75a3",
        "operation": "TRANSFER",
        "version": "1.0",
        "asset": {},
        "metadata": null,
        "inputs": [{
            "owners_before": [PUBLIC_KEY],
            "fulfillment": "pGSAIDE5i63cn4X8T8N1sZ2mGkJD5lNRnBM4PZgI",
            "fulfills": null
        }],
        "outputs": []
    });
    report("TRANSFER without asset id", registry.validate_transaction(&transfer));

    report("Empty record", registry.validate_transaction(&json!({})));
}

fn demo_vote_batch(registry: &SchemaRegistry) {
    println!("--- Vote Batch Validation ---");

    let vote = |timestamp: &str| -> Value {
        json!({
            "node_pubkey": PUBLIC_KEY,
            "signature": "2GWgAf6W3QFHmMHmkmDhjebPLfG3q7Lqu8cJZPZZNTpZ",
            "vote": {
                "voting_for_block": BLOCK_ID,
                "previous_block": BLOCK_ID,
                "is_block_valid": true,
                "invalid_reason": null,
                "timestamp": timestamp
            }
        })
    };

    let votes = vec![vote("1509977988"), vote("yesterday"), vote("1509977990")];
    match validate_votes_batch(registry, &votes, &ValidationConfig::new()) {
        Ok(()) => println!("   All {} votes valid", votes.len()),
        Err(errors) => println!("   {}", errors),
    }
}
