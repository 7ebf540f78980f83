//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

pub mod catalog;
pub mod quote;

use std::path::Path;

use anyhow::{Context, Result};

use hubfreight_lib::Catalog;

/// Load the catalog from `path`, or the built-in reference catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => Ok(Catalog::reference()),
    }
}
