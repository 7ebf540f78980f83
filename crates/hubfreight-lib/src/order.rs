//! Customer orders: product identifier to requested quantity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// An order mapping each product to a requested quantity.
///
/// Products are kept sorted so that weight accumulation along a path always
/// visits them in the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order {
    items: BTreeMap<String, u64>,
}

impl Order {
    /// Create an empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper adding (or replacing) one product line.
    pub fn with_item(mut self, product: impl Into<String>, quantity: u64) -> Self {
        self.items.insert(product.into(), quantity);
        self
    }

    /// Parse an order from a JSON object payload, checked against `catalog`.
    ///
    /// This is the validation boundary used by the HTTP service and the CLI:
    /// the payload must be a non-empty object whose values are non-negative
    /// integers naming products some center stocks.
    pub fn from_json(value: &Value, catalog: &Catalog) -> Result<Self> {
        match value {
            Value::Null => Err(Error::EmptyOrder),
            Value::Object(map) => Self::from_json_map(map, catalog),
            _ => Err(Error::MalformedOrder),
        }
    }

    /// Parse an order from the entries of a JSON object.
    ///
    /// Entries are checked in payload order, quantity before product, so the
    /// first offending entry decides the error.
    pub fn from_json_map(map: &Map<String, Value>, catalog: &Catalog) -> Result<Self> {
        if map.is_empty() {
            return Err(Error::EmptyOrder);
        }

        let mut items = BTreeMap::new();
        for (product, quantity) in map {
            // Only integral JSON numbers qualify; 2.0, -1, "3" and true do not.
            let quantity = quantity.as_u64().ok_or_else(|| Error::InvalidQuantity {
                product: product.clone(),
            })?;
            if catalog.first_supplier(product).is_none() {
                return Err(catalog.unknown_product(product));
            }
            items.insert(product.clone(), quantity);
        }

        Ok(Self { items })
    }

    /// Parse an order from a JSON string.
    pub fn from_json_str(raw: &str, catalog: &Catalog) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::EmptyOrder);
        }
        let value: Value = serde_json::from_str(raw)?;
        Self::from_json(&value, catalog)
    }

    /// Iterate over `(product, quantity)` pairs in product order.
    pub fn items(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.items.iter().map(|(product, &quantity)| (product.as_str(), quantity))
    }

    /// Iterate over the ordered product identifiers.
    pub fn products(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.keys().map(String::as_str)
    }

    /// Requested quantity for `product`, if present.
    pub fn quantity(&self, product: &str) -> Option<u64> {
        self.items.get(product).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Order {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(product, quantity)| (product.into(), quantity))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Order> {
        Order::from_json(&value, &Catalog::reference())
    }

    #[test]
    fn parses_integer_quantities() {
        let order = parse(json!({"A": 1, "G": 0, "D": 3})).unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order.quantity("A"), Some(1));
        assert_eq!(order.quantity("G"), Some(0));
        let products: Vec<_> = order.products().collect();
        assert_eq!(products, vec!["A", "D", "G"]);
    }

    #[test]
    fn rejects_empty_payloads() {
        assert!(matches!(parse(json!({})), Err(Error::EmptyOrder)));
        assert!(matches!(parse(Value::Null), Err(Error::EmptyOrder)));
        assert!(matches!(
            Order::from_json_str("  ", &Catalog::reference()),
            Err(Error::EmptyOrder)
        ));
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert!(matches!(parse(json!([1, 2])), Err(Error::MalformedOrder)));
        assert!(matches!(parse(json!("A")), Err(Error::MalformedOrder)));
    }

    #[test]
    fn rejects_invalid_quantities() {
        for bad in [json!(-1), json!(1.5), json!(2.0), json!("3"), json!(true), json!(null)] {
            let err = parse(json!({"A": bad.clone()})).unwrap_err();
            match err {
                Error::InvalidQuantity { product } => assert_eq!(product, "A"),
                other => panic!("unexpected error for {bad}: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_products_stocked_nowhere() {
        let err = parse(json!({"A": 1, "Z": 2})).unwrap_err();
        assert!(matches!(err, Error::UnknownProduct { ref product, .. } if product == "Z"));
    }

    #[test]
    fn first_bad_entry_in_payload_order_wins() {
        let catalog = Catalog::reference();

        let err = Order::from_json_str(r#"{"Z": 1, "A": -1}"#, &catalog).unwrap_err();
        assert_eq!(err.to_string(), "Product Z not found in any warehouse");

        let err = Order::from_json_str(r#"{"A": -1, "Z": 1}"#, &catalog).unwrap_err();
        assert_eq!(err.to_string(), "Invalid quantity for product A");

        // A bad quantity is reported before its own product is looked up.
        let err = Order::from_json_str(r#"{"Z": -1}"#, &catalog).unwrap_err();
        assert!(matches!(err, Error::InvalidQuantity { .. }));
    }

    #[test]
    fn from_json_str_reports_syntax_errors() {
        assert!(matches!(
            Order::from_json_str("{\"A\": ", &Catalog::reference()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn collects_from_pairs() {
        let order: Order = [("B", 2), ("A", 1)].into_iter().collect();
        let items: Vec<_> = order.items().collect();
        assert_eq!(items, vec![("A", 1), ("B", 2)]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let order = Order::new().with_item("A", 2);
        assert_eq!(serde_json::to_string(&order).unwrap(), r#"{"A":2}"#);
    }
}
