#![allow(dead_code)]

use std::path::PathBuf;

use hubfreight_lib::{Catalog, Order};

/// Path to the checked-in copy of the reference catalog.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/reference_catalog.json")
}

pub fn fixture_catalog() -> Catalog {
    Catalog::from_path(&fixture_path()).expect("fixture catalog loads")
}

/// Build an order from `(product, quantity)` pairs.
pub fn order(items: &[(&str, u64)]) -> Order {
    items.iter().map(|&(product, quantity)| (product, quantity)).collect()
}

pub fn path(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
