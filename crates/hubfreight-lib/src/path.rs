//! Path costing.
//!
//! A path is walked leg by leg. The weight picked up so far is threaded
//! through the walk as a single accumulator that is never reset, and each leg
//! is charged `distance * cost_per_unit(accumulated_weight)`.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::order::Order;

/// Ordered sequence of location identifiers (supply centers and the hub).
pub type Path = Vec<String>;

/// Cost record for one leg of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegCost {
    pub from: String,
    pub to: String,
    pub distance: f64,
    /// Accumulated weight after the pickup at `from`.
    pub carried_weight: f64,
    /// Cost per unit of distance for `carried_weight`.
    pub rate: f64,
    pub cost: f64,
    /// Total cost of the path up to and including this leg.
    pub cumulative_cost: f64,
}

/// Replays paths against a catalog to price them.
#[derive(Debug, Clone, Copy)]
pub struct PathCoster<'a> {
    catalog: &'a Catalog,
}

impl<'a> PathCoster<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Total cost of traversing `path` while collecting `order`.
    ///
    /// Paths with fewer than two locations have no legs and cost nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownLocation`] when the path names a
    /// location that is neither the hub nor a catalog center.
    pub fn cost_of_path<S: AsRef<str>>(&self, path: &[S], order: &Order) -> Result<f64> {
        self.walk(path, order, |_| {})
    }

    /// Per-leg breakdown of [`PathCoster::cost_of_path`].
    pub fn cost_breakdown<S: AsRef<str>>(&self, path: &[S], order: &Order) -> Result<Vec<LegCost>> {
        let mut legs = Vec::with_capacity(path.len().saturating_sub(1));
        self.walk(path, order, |leg| legs.push(leg))?;
        Ok(legs)
    }

    fn walk<S, F>(&self, path: &[S], order: &Order, mut visit: F) -> Result<f64>
    where
        S: AsRef<str>,
        F: FnMut(LegCost),
    {
        let tariff = self.catalog.tariff();
        let mut accumulated_weight = 0.0;
        let mut total_cost = 0.0;

        for leg in path.windows(2) {
            let (current, next) = (leg[0].as_ref(), leg[1].as_ref());
            let distance = self.leg_distance(current, next)?;

            if let Some(center) = self.catalog.center(current) {
                accumulated_weight += center.pickup_weight(order);
            }

            let rate = tariff.cost_per_unit(accumulated_weight);
            let cost = distance * rate;
            total_cost += cost;

            visit(LegCost {
                from: current.to_string(),
                to: next.to_string(),
                distance,
                carried_weight: accumulated_weight,
                rate,
                cost,
                cumulative_cost: total_cost,
            });
        }

        Ok(total_cost)
    }

    /// Distance of one leg.
    ///
    /// Legs touching the hub cost the center's hub distance. A direct
    /// center-to-center leg is routed through the hub, so it costs both
    /// centers' distances.
    fn leg_distance(&self, current: &str, next: &str) -> Result<f64> {
        if self.catalog.is_hub(current) {
            self.catalog.distance_to_hub(next)
        } else if self.catalog.is_hub(next) {
            self.catalog.distance_to_hub(current)
        } else {
            Ok(self.catalog.distance_to_hub(current)? + self.catalog.distance_to_hub(next)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn coster_for(catalog: &Catalog) -> PathCoster<'_> {
        PathCoster::new(catalog)
    }

    #[test]
    fn single_center_to_hub() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("A", 1);
        let cost = coster_for(&catalog).cost_of_path(&["C1", "L1"], &order).unwrap();
        assert_eq!(cost, 40.0);
    }

    #[test]
    fn weight_accumulates_across_legs() {
        let catalog = Catalog::reference();
        // C1 picks up 3 (rate 10), C3 adds 2 for 5 total (still 10), then home.
        let order = Order::new().with_item("A", 1).with_item("I", 1);
        let legs = coster_for(&catalog)
            .cost_breakdown(&["C1", "L1", "C3", "L1"], &order)
            .unwrap();

        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0].distance, 4.0);
        assert_eq!(legs[0].carried_weight, 3.0);
        assert_eq!(legs[1].distance, 2.0);
        assert_eq!(legs[1].carried_weight, 3.0);
        assert_eq!(legs[2].carried_weight, 5.0);
        assert_eq!(legs[2].rate, 10.0);
        assert_eq!(legs[2].cumulative_cost, 40.0 + 20.0 + 20.0);
    }

    #[test]
    fn heavy_pickup_moves_to_next_tier() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("D", 1);
        // 12 units of weight -> rate 10 + 2 * 8 = 26 over distance 3.
        let cost = coster_for(&catalog).cost_of_path(&["C2", "L1"], &order).unwrap();
        assert_eq!(cost, 78.0);
    }

    #[test]
    fn direct_leg_uses_both_hub_distances() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("A", 1).with_item("G", 2);
        let legs = coster_for(&catalog)
            .cost_breakdown(&["C1", "C3", "L1"], &order)
            .unwrap();

        assert_eq!(legs[0].distance, 6.0);
        assert_eq!(legs[0].cost, 60.0);
        assert_eq!(legs[1].carried_weight, 4.0);
        assert_eq!(legs[1].cost, 20.0);
    }

    #[test]
    fn revisited_center_picks_up_again() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("A", 1);
        let legs = coster_for(&catalog)
            .cost_breakdown(&["C1", "L1", "C1", "L1"], &order)
            .unwrap();
        assert_eq!(legs[2].carried_weight, 6.0);
        assert_eq!(legs[2].rate, 18.0);
    }

    #[test]
    fn leg_costs_are_non_negative_and_cumulative_grows() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("E", 2).with_item("B", 3).with_item("H", 1);
        let legs = coster_for(&catalog)
            .cost_breakdown(&["C3", "C1", "L1", "C2", "L1"], &order)
            .unwrap();

        let mut previous = 0.0;
        for leg in &legs {
            assert!(leg.cost >= 0.0);
            assert!(leg.cumulative_cost >= previous);
            previous = leg.cumulative_cost;
        }
        let total = coster_for(&catalog)
            .cost_of_path(&["C3", "C1", "L1", "C2", "L1"], &order)
            .unwrap();
        assert_eq!(previous, total);
    }

    #[test]
    fn trivial_paths_cost_nothing() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("A", 1);
        let coster = coster_for(&catalog);
        assert_eq!(coster.cost_of_path::<&str>(&[], &order).unwrap(), 0.0);
        assert_eq!(coster.cost_of_path(&["C1"], &order).unwrap(), 0.0);
    }

    #[test]
    fn unknown_location_is_an_error() {
        let catalog = Catalog::reference();
        let order = Order::new();
        let err = coster_for(&catalog)
            .cost_of_path(&["C1", "X9"], &order)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownLocation { ref id } if id == "X9"));
    }
}
