//! Weight-tiered shipping tariff.
//!
//! The per-unit rate is flat up to the free weight and then increases by a
//! fixed amount for every started block of extra weight:
//!
//! ```text
//! weight <= 5          -> 10
//! weight in (5, 10]    -> 18
//! weight in (10, 15]   -> 26
//! ...
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parameters of the tiered cost-per-unit step function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    /// Weight carried at the base rate (inclusive).
    pub free_weight: f64,
    /// Rate charged per unit of distance for loads up to `free_weight`.
    pub base_rate: f64,
    /// Size of each additional weight block.
    pub block_weight: f64,
    /// Rate increase for every started block above `free_weight`.
    pub block_rate: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            free_weight: 5.0,
            base_rate: 10.0,
            block_weight: 5.0,
            block_rate: 8.0,
        }
    }
}

impl CostTable {
    /// Cost per unit of distance when carrying `weight`.
    ///
    /// Partial blocks round up, so any weight strictly above a block boundary
    /// pays for the whole next block.
    ///
    /// ```
    /// use hubfreight_lib::CostTable;
    ///
    /// let table = CostTable::default();
    /// assert_eq!(table.cost_per_unit(5.0), 10.0);
    /// assert_eq!(table.cost_per_unit(5.0001), 18.0);
    /// assert_eq!(table.cost_per_unit(10.0), 18.0);
    /// assert_eq!(table.cost_per_unit(10.0001), 26.0);
    /// ```
    pub fn cost_per_unit(&self, weight: f64) -> f64 {
        if weight <= self.free_weight {
            return self.base_rate;
        }
        let additional = weight - self.free_weight;
        let blocks = (additional / self.block_weight).ceil();
        self.base_rate + blocks * self.block_rate
    }

    /// Validate the tariff parameters.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("free_weight", self.free_weight),
            ("base_rate", self.base_rate),
            ("block_weight", self.block_weight),
            ("block_rate", self.block_rate),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::CatalogValidation {
                    message: format!("tariff {name} must be a finite non-negative number, got {value}"),
                });
            }
        }

        if self.block_weight <= 0.0 {
            return Err(Error::CatalogValidation {
                message: "tariff block_weight must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Cost per unit of distance under the default tariff.
pub fn cost_per_unit(weight: f64) -> f64 {
    CostTable::default().cost_per_unit(weight)
}
