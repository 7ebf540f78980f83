//! Application state for HTTP microservices.
//!
//! Holds the supply-center catalog that every handler prices orders against.
//! The catalog is loaded once at startup and never mutated afterwards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hubfreight_lib::{Catalog, Error as LibError};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Catalog file not found.
    CatalogNotFound(String),

    /// Catalog file could not be read or failed validation.
    CatalogLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CatalogNotFound(path) => write!(f, "catalog not found: {}", path),
            Self::CatalogLoad(e) => write!(f, "failed to load catalog: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::CatalogNotFound { path } => {
                Self::CatalogNotFound(path.display().to_string())
            }
            other => Self::CatalogLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it via axum's `State`
/// extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::post, extract::State};
/// use hubfreight_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let catalog = state.catalog();
///     // ... price an order
/// }
///
/// let state = AppState::reference();
/// let app = Router::new()
///     .route("/api/calculate-delivery-cost", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    source: Option<PathBuf>,
}

impl AppState {
    /// Load application state from a catalog JSON file.
    pub fn load(catalog_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let catalog_path = catalog_path.as_ref();

        tracing::info!(path = %catalog_path.display(), "loading catalog");
        let catalog = Catalog::from_path(catalog_path)?;
        tracing::info!(
            centers = catalog.len(),
            hub = %catalog.hub(),
            "catalog loaded successfully"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog,
                source: Some(catalog_path.to_path_buf()),
            }),
        })
    }

    /// Load from `catalog_path` when given, otherwise use the built-in
    /// reference catalog.
    pub fn load_or_reference(catalog_path: Option<&Path>) -> Result<Self, AppStateError> {
        match catalog_path {
            Some(path) => Self::load(path),
            None => {
                tracing::info!("no catalog path configured, using reference catalog");
                Ok(Self::reference())
            }
        }
    }

    /// State backed by the built-in reference catalog.
    pub fn reference() -> Self {
        Self::from_catalog(Catalog::reference())
    }

    /// Create application state from an already-built catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                source: None,
            }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// File the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.inner.source.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("center_count", &self.inner.catalog.len())
            .field("hub", &self.inner.catalog.hub())
            .field("source", &self.inner.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_app_state_reference() {
        let state = AppState::reference();
        assert_eq!(state.catalog().len(), 3);
        assert_eq!(state.catalog().hub(), "L1");
        assert!(state.source().is_none());
    }

    #[test]
    fn test_app_state_clone_shares_catalog() {
        let state1 = AppState::reference();
        let state2 = state1.clone();
        assert!(std::ptr::eq(state1.catalog(), state2.catalog()));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::reference();
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("center_count"));
        assert!(debug.contains("L1"));
    }

    #[test]
    fn test_app_state_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"hub":"Depot","centers":[{{"id":"W1","distance":2,"products":{{"x":1}}}}]}}"#
        )
        .unwrap();

        let state = AppState::load(file.path()).unwrap();
        assert_eq!(state.catalog().hub(), "Depot");
        assert_eq!(state.source(), Some(file.path()));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load("/nonexistent/path/to/catalog.json");

        match result.unwrap_err() {
            AppStateError::CatalogNotFound(path) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_app_state_load_invalid_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"centers":[]}}"#).unwrap();

        let err = AppState::load(file.path()).unwrap_err();
        assert!(matches!(err, AppStateError::CatalogLoad(_)));
        assert!(err.to_string().contains("at least one supply center"));
    }

    #[test]
    fn test_load_or_reference_defaults() {
        let state = AppState::load_or_reference(None).unwrap();
        assert_eq!(state.catalog().len(), 3);
    }
}
