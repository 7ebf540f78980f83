use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the hubfreight library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog file could not be located at the resolved path.
    #[error("catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },

    /// Raised when a catalog violates one of its structural invariants.
    #[error("invalid catalog: {message}")]
    CatalogValidation { message: String },

    /// Raised when a path references a location that is neither the hub nor a
    /// supply center of the catalog.
    #[error("unknown location: {id}")]
    UnknownLocation { id: String },

    /// Raised when an ordered product is not stocked by any supply center.
    #[error("Product {product} not found in any warehouse{}", format_suggestions(.suggestions))]
    UnknownProduct {
        product: String,
        suggestions: Vec<String>,
    },

    /// Raised when an order quantity is not a non-negative integer.
    #[error("Invalid quantity for product {product}")]
    InvalidQuantity { product: String },

    /// Raised when an order payload is missing or empty.
    #[error("No order data provided")]
    EmptyOrder,

    /// Raised when an order payload is valid JSON but not an object.
    #[error("order must be a JSON object mapping product to quantity")]
    MalformedOrder,

    /// Raised when no candidate delivery path exists for an order.
    #[error("no delivery path could be generated for the order")]
    NoCandidatePath,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_product_without_suggestions() {
        let err = Error::UnknownProduct {
            product: "Z".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "Product Z not found in any warehouse");
    }

    #[test]
    fn unknown_product_lists_suggestions() {
        let err = Error::UnknownProduct {
            product: "a".to_string(),
            suggestions: vec!["A".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Product a not found in any warehouse. Did you mean 'A'?"
        );

        let err = Error::UnknownProduct {
            product: "x".to_string(),
            suggestions: vec!["A".to_string(), "B".to_string()],
        };
        assert!(err.to_string().ends_with("Did you mean one of: 'A', 'B'?"));
    }

    #[test]
    fn invalid_quantity_names_product() {
        let err = Error::InvalidQuantity {
            product: "B".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid quantity for product B");
    }
}
