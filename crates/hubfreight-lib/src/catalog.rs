//! Supply-center catalog loading and lookup.
//!
//! A [`Catalog`] is the fixed, read-only description of the delivery network:
//! the supply centers in their declared order, the hub identifier and the
//! tariff. The built-in reference catalog is returned by
//! [`Catalog::reference`]; alternatives are loaded from JSON with
//! [`Catalog::from_path`] or [`Catalog::from_reader`].

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cost::CostTable;
use crate::error::{Error, Result};
use crate::order::Order;

/// Identifier of the hub in the reference catalog.
pub const DEFAULT_HUB: &str = "L1";

/// A supply center stocking products at a fixed distance from the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyCenter {
    pub id: String,
    /// Distance between this center and the hub.
    pub distance: f64,
    /// Per-unit weight of every stocked product.
    #[serde(default)]
    pub products: BTreeMap<String, f64>,
}

impl SupplyCenter {
    pub fn new(id: impl Into<String>, distance: f64) -> Self {
        Self {
            id: id.into(),
            distance,
            products: BTreeMap::new(),
        }
    }

    /// Builder-style helper adding a stocked product.
    pub fn with_product(mut self, product: impl Into<String>, unit_weight: f64) -> Self {
        self.products.insert(product.into(), unit_weight);
        self
    }

    pub fn stocks(&self, product: &str) -> bool {
        self.products.contains_key(product)
    }

    pub fn unit_weight(&self, product: &str) -> Option<f64> {
        self.products.get(product).copied()
    }

    /// Weight picked up at this center for `order`.
    ///
    /// Every ordered product this center stocks is collected here, whether or
    /// not another center was chosen as its source.
    pub fn pickup_weight(&self, order: &Order) -> f64 {
        order
            .items()
            .filter_map(|(product, quantity)| {
                self.unit_weight(product)
                    .map(|weight| quantity as f64 * weight)
            })
            .sum()
    }
}

/// On-disk catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default = "default_hub")]
    hub: String,
    centers: Vec<SupplyCenter>,
    #[serde(default)]
    tariff: CostTable,
}

fn default_hub() -> String {
    DEFAULT_HUB.to_string()
}

/// Read-only delivery network shared by the path generator, coster and
/// optimizer.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    hub: String,
    centers: Vec<SupplyCenter>,
    tariff: CostTable,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating its invariants.
    pub fn new(hub: impl Into<String>, centers: Vec<SupplyCenter>, tariff: CostTable) -> Result<Self> {
        let hub = hub.into();
        validate(&hub, &centers, &tariff)?;
        Ok(Self::assemble(hub, centers, tariff))
    }

    /// The reference network: three centers around hub `L1`.
    ///
    /// | center | products (unit weight) | distance |
    /// |--------|------------------------|----------|
    /// | C1     | A:3, B:2, C:8          | 4        |
    /// | C2     | D:12, E:25, F:15       | 3        |
    /// | C3     | G:0.5, H:1, I:2        | 2        |
    pub fn reference() -> Self {
        let centers = vec![
            SupplyCenter::new("C1", 4.0)
                .with_product("A", 3.0)
                .with_product("B", 2.0)
                .with_product("C", 8.0),
            SupplyCenter::new("C2", 3.0)
                .with_product("D", 12.0)
                .with_product("E", 25.0)
                .with_product("F", 15.0),
            SupplyCenter::new("C3", 2.0)
                .with_product("G", 0.5)
                .with_product("H", 1.0)
                .with_product("I", 2.0),
        ];
        Self::assemble(DEFAULT_HUB.to_string(), centers, CostTable::default())
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        tracing::debug!(
            path = %path.display(),
            centers = catalog.len(),
            hub = %catalog.hub,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a catalog from a reader yielding a JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::new(document.hub, document.centers, document.tariff)
    }

    /// Load a catalog from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_reader(raw.as_bytes())
    }

    fn assemble(hub: String, centers: Vec<SupplyCenter>, tariff: CostTable) -> Self {
        let positions = centers
            .iter()
            .enumerate()
            .map(|(index, center)| (center.id.clone(), index))
            .collect();
        Self {
            hub,
            centers,
            tariff,
            positions,
        }
    }

    pub fn hub(&self) -> &str {
        &self.hub
    }

    pub fn is_hub(&self, id: &str) -> bool {
        self.hub == id
    }

    /// Supply centers in declared order.
    pub fn centers(&self) -> &[SupplyCenter] {
        &self.centers
    }

    pub fn center(&self, id: &str) -> Option<&SupplyCenter> {
        self.positions.get(id).map(|&index| &self.centers[index])
    }

    /// Declared position of a center, used to keep center sets ordered.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn tariff(&self) -> &CostTable {
        &self.tariff
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Distance of a supply center to the hub.
    pub fn distance_to_hub(&self, id: &str) -> Result<f64> {
        self.center(id)
            .map(|center| center.distance)
            .ok_or_else(|| Error::UnknownLocation { id: id.to_string() })
    }

    /// First center, in declared order, that stocks `product`.
    pub fn first_supplier(&self, product: &str) -> Option<&SupplyCenter> {
        self.centers.iter().find(|center| center.stocks(product))
    }

    /// All distinct product identifiers stocked anywhere, sorted.
    pub fn products(&self) -> Vec<&str> {
        let mut products: Vec<&str> = self
            .centers
            .iter()
            .flat_map(|center| center.products.keys().map(String::as_str))
            .collect();
        products.sort_unstable();
        products.dedup();
        products
    }

    /// Ensure every ordered product is stocked by at least one center.
    pub fn check_order(&self, order: &Order) -> Result<()> {
        for product in order.products() {
            if self.first_supplier(product).is_none() {
                return Err(self.unknown_product(product));
            }
        }
        Ok(())
    }

    /// [`Error::UnknownProduct`] for `product`, with close matches attached.
    pub(crate) fn unknown_product(&self, product: &str) -> Error {
        Error::UnknownProduct {
            product: product.to_string(),
            suggestions: self.product_suggestions(product, 3),
        }
    }

    /// Stocked products whose names resemble `product`, best match first.
    pub fn product_suggestions(&self, product: &str, limit: usize) -> Vec<String> {
        let needle = product.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .products()
            .into_iter()
            .map(|candidate| {
                let score = strsim::normalized_damerau_levenshtein(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= 0.6)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

fn validate(hub: &str, centers: &[SupplyCenter], tariff: &CostTable) -> Result<()> {
    let invalid = |message: String| Error::CatalogValidation { message };

    if hub.trim().is_empty() {
        return Err(invalid("hub identifier cannot be empty".to_string()));
    }
    if centers.is_empty() {
        return Err(invalid("catalog must declare at least one supply center".to_string()));
    }

    let mut seen = HashSet::new();
    for center in centers {
        if center.id.trim().is_empty() {
            return Err(invalid("supply center identifier cannot be empty".to_string()));
        }
        if center.id == hub {
            return Err(invalid(format!(
                "supply center '{}' uses the hub identifier",
                center.id
            )));
        }
        if !seen.insert(center.id.as_str()) {
            return Err(invalid(format!("duplicate supply center '{}'", center.id)));
        }
        if !center.distance.is_finite() || center.distance < 0.0 {
            return Err(invalid(format!(
                "supply center '{}' has invalid distance {}",
                center.id, center.distance
            )));
        }
        for (product, weight) in &center.products {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(invalid(format!(
                    "product '{}' at '{}' has invalid unit weight {}",
                    product, center.id, weight
                )));
            }
        }
    }

    tariff.validate()
}
