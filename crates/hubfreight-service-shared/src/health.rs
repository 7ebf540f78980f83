//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator, always "ok" when the handler answers.
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of supply centers in the loaded catalog (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centers_loaded: Option<usize>,

    /// Hub identifier of the loaded catalog (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            centers_loaded: None,
            hub: None,
        }
    }

    pub fn ready(service: &str, version: &str, centers: usize, hub: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            centers_loaded: Some(centers),
            hub: Some(hub.to_string()),
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"hubfreight-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The catalog is loaded and validated before the router is built, so a
/// running service is always ready; the body reports what it serves.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"hubfreight-service-shared","version":"0.1.0","centers_loaded":3,"hub":"L1"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        catalog.len(),
        catalog.hub(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
