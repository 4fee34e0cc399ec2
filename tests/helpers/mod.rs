//! Shared fixtures for the integration tests
//!
//! A small inventory of steel, copper and biosphere activities spread over
//! three databases and four locations.

#![allow(dead_code)]

use lca_search::{ActivityKey, IndexManager, InMemoryActivityStore};
use serde_json::{json, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn datasets() -> Vec<Value> {
    vec![
        json!({
            "database": "ecoinvent",
            "code": "s1",
            "name": "steel production, converter",
            "reference product": "steel, low-alloyed",
            "categories": ["metals", "production"],
            "location": "CH",
            "unit": "kilogram"
        }),
        json!({
            "database": "ecoinvent",
            "code": "s2",
            "name": "steel production, electric",
            "reference product": "steel, unalloyed",
            "location": "DE",
            "unit": "kilogram"
        }),
        json!({
            "database": "ecoinvent",
            "code": "s3",
            "name": "market for steel",
            "reference product": "steel, low-alloyed",
            "location": "GLO",
            "unit": "kilogram"
        }),
        json!({
            "database": "ecoinvent",
            "code": "c1",
            "name": "copper mining",
            "reference product": "copper concentrate",
            "comment": "tailings are treated at a nearby steel mill",
            "location": "CL",
            "unit": "kilogram"
        }),
        json!({
            "database": "recycling",
            "code": "s4",
            "name": "steel recycling",
            "reference product": "steel scrap",
            "location": "CH",
            "unit": "kilogram"
        }),
        json!({
            "database": "biosphere3",
            "code": "b1",
            "name": "Carbon dioxide, fossil",
            "categories": ["air"],
            "type": "emission",
            "unit": "kilogram"
        }),
    ]
}

pub fn key_of(dataset: &Value) -> ActivityKey {
    ActivityKey::new(
        dataset["database"].as_str().unwrap_or_default(),
        dataset["code"].as_str().unwrap_or_default(),
    )
}

pub fn store() -> InMemoryActivityStore {
    let mut store = InMemoryActivityStore::new();
    for ds in datasets() {
        store.insert(key_of(&ds), ds);
    }
    store
}

pub fn populated_index() -> IndexManager {
    init_tracing();
    let manager = IndexManager::in_ram().expect("in-RAM index");
    manager
        .add_datasets(&datasets())
        .expect("fixture datasets index cleanly");
    manager
}
