//! `catalog` command: print the loaded catalog.

use anyhow::Result;

use hubfreight_lib::Catalog;

use crate::output::{render_catalog, OutputFormat};

pub fn handle_catalog(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    print!("{}", render_catalog(catalog, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
