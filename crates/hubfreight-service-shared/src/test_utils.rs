//! Test utilities for handler testing.
//!
//! Provides state backed by the reference catalog fixture and a few known
//! orders with their expected quotes.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use crate::state::AppState;

/// Path to the reference catalog fixture.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/reference_catalog.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared AppState loaded from the fixture catalog.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_catalog_path();
            AppState::load(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

pub fn fixture_catalog_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Orders against the reference catalog with their known cheapest quotes.
pub mod fixture_orders {
    /// `{"A": 1}` costs 40 via `C1 -> L1`.
    pub const SINGLE_A: &str = r#"{"A": 1}"#;

    /// `{"A": 1, "D": 1}` costs 148 via `C1 -> L1 -> C2 -> L1`.
    pub const A_AND_D: &str = r#"{"A": 1, "D": 1}"#;

    /// `{"G": 4}` costs 20 via `C3 -> L1`.
    pub const LIGHT_G: &str = r#"{"G": 4}"#;
}

/// Generate a unique request ID for testing.
///
/// Each call yields a fresh `test-<n>` value, so concurrent tests never
/// share an `instance`.
pub fn test_request_id() -> String {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    format!("test-{}", NEXT.fetch_add(1, Ordering::Relaxed))
}
