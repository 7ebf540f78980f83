//! Output formatting for quotes and catalogs.
//!
//! Renderers return the full text so handlers decide where it goes and tests
//! can inspect it directly.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use hubfreight_lib::{Catalog, LegCost, Quote};

/// Output format selectable with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// JSON view of a quote. `legs` is only present with `--breakdown`.
#[derive(Debug, Serialize)]
struct QuoteView<'a> {
    minimum_cost: f64,
    optimal_path: &'a [String],
    candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    legs: Option<&'a [LegCost]>,
}

/// Render a quote in the requested format.
pub fn render_quote(quote: &Quote, format: OutputFormat, breakdown: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_quote_text(quote, breakdown)),
        OutputFormat::Json => {
            let view = QuoteView {
                minimum_cost: quote.minimum_cost,
                optimal_path: &quote.optimal_path,
                candidates: quote.candidates,
                legs: breakdown.then_some(quote.legs.as_slice()),
            };
            Ok(serde_json::to_string_pretty(&view)?)
        }
    }
}

fn render_quote_text(quote: &Quote, breakdown: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Minimum cost: {}", quote.minimum_cost);
    let _ = writeln!(out, "Path: {}", quote.optimal_path.join(" -> "));
    let _ = writeln!(out, "Candidates evaluated: {}", quote.candidates);

    if breakdown {
        out.push('\n');
        let _ = writeln!(
            out,
            "{:<16} {:>9} {:>9} {:>7} {:>9} {:>11}",
            "Leg", "Distance", "Weight", "Rate", "Cost", "Cumulative"
        );
        for leg in &quote.legs {
            let _ = writeln!(
                out,
                "{:<16} {:>9} {:>9} {:>7} {:>9} {:>11}",
                format!("{} -> {}", leg.from, leg.to),
                leg.distance,
                leg.carried_weight,
                leg.rate,
                leg.cost,
                leg.cumulative_cost
            );
        }
    }

    out
}

/// Render a catalog in the requested format.
///
/// The JSON form is the catalog file format, so it can be edited and loaded
/// back with `--catalog`.
pub fn render_catalog(catalog: &Catalog, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_catalog_text(catalog)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(catalog)?),
    }
}

fn render_catalog_text(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hub: {}", catalog.hub());
    let _ = writeln!(out, "Supply centers ({}):", catalog.len());
    let _ = writeln!(out, "{:<8} {:>9}  Products (unit weight)", "Center", "Distance");

    for center in catalog.centers() {
        let products: Vec<String> = center
            .products
            .iter()
            .map(|(name, weight)| format!("{}={}", name, weight))
            .collect();
        let _ = writeln!(
            out,
            "{:<8} {:>9}  {}",
            center.id,
            center.distance,
            products.join(", ")
        );
    }

    let tariff = catalog.tariff();
    let _ = writeln!(
        out,
        "Tariff: rate {} up to weight {}, +{} per started block of {}",
        tariff.base_rate, tariff.free_weight, tariff.block_rate, tariff.block_weight
    );

    out
}
