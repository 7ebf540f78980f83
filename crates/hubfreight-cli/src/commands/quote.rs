//! `quote` command: price an order from the terminal.

use anyhow::{Context, Result};

use hubfreight_lib::{quote, Catalog, Order, Quote};

use crate::output::{render_quote, OutputFormat};

/// Handle the quote subcommand.
///
/// The order goes through the same validation as the HTTP service: a
/// non-empty JSON object of non-negative integer quantities whose products
/// are all stocked somewhere.
pub fn handle_quote(
    catalog: &Catalog,
    order_json: &str,
    format: OutputFormat,
    breakdown: bool,
) -> Result<()> {
    let quote = quote_order(catalog, order_json)?;
    print!("{}", render_quote(&quote, format, breakdown)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

/// Parse `order_json` and quote it against `catalog`.
pub fn quote_order(catalog: &Catalog, order_json: &str) -> Result<Quote> {
    let order = Order::from_json_str(order_json, catalog).context("invalid order")?;
    tracing::debug!(products = order.len(), "quoting order");
    quote(catalog, &order).context("failed to quote order")
}
