//! hubfreight library entry points.
//!
//! This crate models a fixed set of supply centers around a single delivery
//! hub, prices a delivery path under the weight-tiered tariff, enumerates the
//! candidate paths for an order and selects the cheapest one. Higher-level
//! consumers (CLI, HTTP service) should only depend on the functions exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod cost;
pub mod error;
pub mod generator;
pub mod optimizer;
pub mod order;
pub mod path;

pub use catalog::{Catalog, SupplyCenter, DEFAULT_HUB};
pub use cost::{cost_per_unit, CostTable};
pub use error::{Error, Result};
pub use generator::PathGenerator;
pub use optimizer::{optimize, quote, CostResult, Optimizer, Quote};
pub use order::Order;
pub use path::{LegCost, Path, PathCoster};
