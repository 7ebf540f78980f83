//! Order payload parsing and validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hubfreight_lib::{Catalog, Error as LibError, Order};

use crate::problem::from_lib_error;
use crate::ProblemDetails;

/// Body of `POST /api/calculate-delivery-cost`: product name to quantity.
///
/// ```json
/// {"A": 1, "D": 2}
/// ```
///
/// Values are kept as raw JSON so that a bad quantity can be reported with
/// the product it belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRequest {
    pub items: Map<String, Value>,
}

impl OrderRequest {
    /// Parse a raw request body.
    ///
    /// A blank body or a JSON `null` parses to an empty request, which
    /// [`OrderRequest::to_order`] then rejects.
    pub fn from_bytes(body: &[u8], request_id: &str) -> Result<Self, Box<ProblemDetails>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| {
            Box::new(ProblemDetails::bad_request(
                format!("Invalid JSON body: {}", e),
                request_id,
            ))
        })?;

        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(items) => Ok(Self { items }),
            _ => Err(Box::new(from_lib_error(&LibError::MalformedOrder, request_id))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert to a typed [`Order`], checking each entry against `catalog`
    /// in the order the caller sent them.
    ///
    /// `request_id` populates the `instance` field of the returned problem,
    /// which is boxed to keep the `Err` variant small.
    pub fn to_order(
        &self,
        catalog: &Catalog,
        request_id: &str,
    ) -> Result<Order, Box<ProblemDetails>> {
        Order::from_json_map(&self.items, catalog)
            .map_err(|e| Box::new(from_lib_error(&e, request_id)))
    }
}
