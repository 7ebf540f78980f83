//! Cheapest-path selection.
//!
//! [`Optimizer::optimize`] is the core operation: it enumerates the candidate
//! paths for an order, prices each one and keeps the first path with the
//! strictly lowest cost. [`quote`] wraps it with the checks and the per-leg
//! breakdown that the CLI and HTTP service report.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::generator::PathGenerator;
use crate::order::Order;
use crate::path::{LegCost, Path, PathCoster};

/// Minimum cost over all candidate paths and the path achieving it.
///
/// When no candidate exists `optimal_path` is `None` and `minimum_cost` is
/// infinite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostResult {
    pub minimum_cost: f64,
    pub optimal_path: Option<Path>,
}

impl CostResult {
    /// The "no path" result.
    pub fn none() -> Self {
        Self {
            minimum_cost: f64::INFINITY,
            optimal_path: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.optimal_path.is_some()
    }
}

/// Drives path generation and costing against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct Optimizer<'a> {
    generator: PathGenerator<'a>,
    coster: PathCoster<'a>,
}

impl<'a> Optimizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            generator: PathGenerator::new(catalog),
            coster: PathCoster::new(catalog),
        }
    }

    pub fn generator(&self) -> &PathGenerator<'a> {
        &self.generator
    }

    pub fn coster(&self) -> &PathCoster<'a> {
        &self.coster
    }

    /// Cheapest candidate path for `order`.
    ///
    /// Ties keep the first path found; start centers and permutations are
    /// enumerated in a fixed order, so the result is deterministic.
    pub fn optimize(&self, order: &Order) -> Result<CostResult> {
        Ok(self.evaluate(order)?.0)
    }

    fn evaluate(&self, order: &Order) -> Result<(CostResult, usize)> {
        let candidates = self.generator.generate_paths(order);
        let candidate_count = candidates.len();
        let mut best = CostResult::none();

        for path in candidates {
            let cost = self.coster.cost_of_path(&path, order)?;
            if cost < best.minimum_cost {
                best.minimum_cost = cost;
                best.optimal_path = Some(path);
            }
        }

        tracing::debug!(
            candidates = candidate_count,
            minimum_cost = best.minimum_cost,
            path = ?best.optimal_path,
            "evaluated delivery paths"
        );

        Ok((best, candidate_count))
    }
}

/// Cheapest candidate path for `order` against `catalog`.
pub fn optimize(catalog: &Catalog, order: &Order) -> Result<CostResult> {
    Optimizer::new(catalog).optimize(order)
}

/// Priced delivery plan for an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub minimum_cost: f64,
    pub optimal_path: Path,
    /// Number of candidate paths that were priced.
    pub candidates: usize,
    pub legs: Vec<LegCost>,
}

impl Quote {
    /// Number of legs in the chosen path.
    pub fn leg_count(&self) -> usize {
        self.optimal_path.len().saturating_sub(1)
    }
}

/// Validate `order` against `catalog`, optimize it and break the winning path
/// down per leg.
///
/// # Errors
///
/// - [`Error::UnknownProduct`] when an ordered product is stocked nowhere.
/// - [`Error::NoCandidatePath`] when the catalog yields no candidate.
pub fn quote(catalog: &Catalog, order: &Order) -> Result<Quote> {
    catalog.check_order(order)?;

    let optimizer = Optimizer::new(catalog);
    let (result, candidates) = optimizer.evaluate(order)?;
    let Some(optimal_path) = result.optimal_path else {
        return Err(Error::NoCandidatePath);
    };
    let legs = optimizer.coster.cost_breakdown(&optimal_path, order)?;

    Ok(Quote {
        minimum_cost: result.minimum_cost,
        optimal_path,
        candidates,
        legs,
    })
}
