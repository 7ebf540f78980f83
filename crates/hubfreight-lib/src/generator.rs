//! Candidate path enumeration.
//!
//! For every possible start center the generator emits two path shapes over
//! the remaining needed centers:
//!
//! - hub-bouncing: `[start, Hub, o1, Hub, o2, Hub, ..., on, Hub]`, one path
//!   per permutation of the other centers;
//! - direct-chain: `[start, o1, o2, ..., on, Hub]`, a single path in catalog
//!   order, only when there is at least one other center.
//!
//! With `k` other centers each start contributes `k! + 1` paths, or one path
//! when `k == 0`.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, SupplyCenter};
use crate::order::Order;
use crate::path::Path;

/// Enumerates delivery paths for an order against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator<'a> {
    catalog: &'a Catalog,
}

impl<'a> PathGenerator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Centers that must be visited to collect `order`.
    ///
    /// Each product is sourced from the first center, in declared order, that
    /// stocks it; the result is deduplicated and kept in declared order.
    /// Products stocked nowhere are skipped.
    pub fn needed_centers(&self, order: &Order) -> Vec<&'a SupplyCenter> {
        let positions: BTreeSet<usize> = order
            .products()
            .filter_map(|product| self.catalog.first_supplier(product))
            .filter_map(|center| self.catalog.position(&center.id))
            .collect();

        positions
            .into_iter()
            .map(|index| &self.catalog.centers()[index])
            .collect()
    }

    /// Every candidate path for `order`, grouped by start center.
    pub fn generate_paths(&self, order: &Order) -> Vec<Path> {
        let needed = self.needed_centers(order);
        let hub = self.catalog.hub();
        let mut paths = Vec::new();

        for start in self.catalog.centers() {
            let others: Vec<&str> = needed
                .iter()
                .filter(|center| center.id != start.id)
                .map(|center| center.id.as_str())
                .collect();

            for permutation in permutations(&others) {
                paths.push(hub_bouncing_path(&start.id, &permutation, hub));
            }

            if !others.is_empty() {
                paths.push(direct_chain_path(&start.id, &others, hub));
            }
        }

        tracing::trace!(
            needed = needed.len(),
            candidates = paths.len(),
            "generated candidate paths"
        );

        paths
    }
}

/// `[start, Hub, o1, Hub, ..., on, Hub]`
fn hub_bouncing_path(start: &str, others: &[&str], hub: &str) -> Path {
    let mut path = Vec::with_capacity(2 + others.len() * 2);
    path.push(start.to_string());
    path.push(hub.to_string());
    for center in others {
        path.push((*center).to_string());
        path.push(hub.to_string());
    }
    path
}

/// `[start, o1, ..., on, Hub]`
fn direct_chain_path(start: &str, others: &[&str], hub: &str) -> Path {
    std::iter::once(start)
        .chain(others.iter().copied())
        .chain(std::iter::once(hub))
        .map(str::to_string)
        .collect()
}

/// All orderings of `items`, in lexicographic order of their positions.
///
/// The empty slice has exactly one permutation, the empty one.
fn permutations<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }

    let mut result = Vec::new();
    for (index, &head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(index);
        for tail in permutations(&rest) {
            let mut permutation = Vec::with_capacity(items.len());
            permutation.push(head);
            permutation.extend(tail);
            result.push(permutation);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostTable;

    fn as_strs(path: &Path) -> Vec<&str> {
        path.iter().map(String::as_str).collect()
    }

    #[test]
    fn permutations_are_complete_and_ordered() {
        assert_eq!(permutations::<u8>(&[]), vec![Vec::<u8>::new()]);
        assert_eq!(permutations(&[1]), vec![vec![1]]);
        assert_eq!(
            permutations(&[1, 2, 3]),
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn needed_centers_use_first_match_in_declared_order() {
        let catalog = Catalog::reference();
        let generator = PathGenerator::new(&catalog);
        let order = Order::new().with_item("H", 1).with_item("A", 1).with_item("B", 2);
        let ids: Vec<_> = generator
            .needed_centers(&order)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["C1", "C3"]);
    }

    #[test]
    fn multi_sourced_product_only_uses_first_center() {
        let centers = vec![
            SupplyCenter::new("Far", 10.0).with_product("bolt", 1.0),
            SupplyCenter::new("Near", 1.0).with_product("bolt", 1.0),
        ];
        let catalog = Catalog::new("Hub", centers, CostTable::default()).unwrap();
        let generator = PathGenerator::new(&catalog);
        let needed = generator.needed_centers(&Order::new().with_item("bolt", 1));
        assert_eq!(needed.len(), 1);
        assert_eq!(needed[0].id, "Far");
    }

    #[test]
    fn single_needed_center_yields_direct_trip() {
        let catalog = Catalog::reference();
        let paths = PathGenerator::new(&catalog).generate_paths(&Order::new().with_item("A", 1));

        assert!(paths.iter().any(|p| as_strs(p) == ["C1", "L1"]));
        // C1 start: 1 path; C2 and C3 starts: 1! + 1 paths each.
        assert_eq!(paths.len(), 1 + 2 + 2);
        assert!(paths.iter().any(|p| as_strs(p) == ["C2", "L1", "C1", "L1"]));
        assert!(paths.iter().any(|p| as_strs(p) == ["C2", "C1", "L1"]));
    }

    #[test]
    fn two_needed_centers_from_first_start() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("A", 1).with_item("D", 1);
        let paths = PathGenerator::new(&catalog).generate_paths(&order);

        let from_c1: Vec<_> = paths
            .iter()
            .filter(|p| p[0] == "C1")
            .map(as_strs)
            .collect();
        assert_eq!(
            from_c1,
            vec![vec!["C1", "L1", "C2", "L1"], vec!["C1", "C2", "L1"]]
        );
    }

    #[test]
    fn candidate_count_matches_factorial_formula() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("A", 1).with_item("D", 1).with_item("G", 1);
        let paths = PathGenerator::new(&catalog).generate_paths(&order);
        // Every start is needed, so k = 2 others for each: 3 * (2! + 1).
        assert_eq!(paths.len(), 9);
    }

    #[test]
    fn empty_order_bounces_each_start_to_hub() {
        let catalog = Catalog::reference();
        let paths = PathGenerator::new(&catalog).generate_paths(&Order::new());
        let paths: Vec<_> = paths.iter().map(as_strs).collect();
        assert_eq!(
            paths,
            vec![vec!["C1", "L1"], vec!["C2", "L1"], vec!["C3", "L1"]]
        );
    }

    #[test]
    fn hub_never_repeats_consecutively() {
        let catalog = Catalog::reference();
        let order = Order::new().with_item("C", 1).with_item("E", 1).with_item("I", 1);
        for path in PathGenerator::new(&catalog).generate_paths(&order) {
            assert!(path.len() >= 2);
            assert_eq!(path.last().map(String::as_str), Some("L1"));
            for leg in path.windows(2) {
                assert!(!(leg[0] == "L1" && leg[1] == "L1"), "double hub in {path:?}");
            }
        }
    }
}
