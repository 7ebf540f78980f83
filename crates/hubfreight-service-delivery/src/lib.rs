//! Hub delivery cost HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /api/calculate-delivery-cost` - Cheapest delivery path for an order
//! - `GET /metrics` - Prometheus metrics endpoint (path set by `METRICS_PATH`)
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `HUBFREIGHT_CATALOG_PATH` - Catalog JSON file (reference catalog when unset)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default), text or pretty
//! - `METRICS_ENABLED` - Set to `false` to disable metrics and their endpoint
//! - `METRICS_PATH` - Route of the metrics endpoint (default: /metrics)

use std::any::Any;
use std::path::PathBuf;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info, warn};

use hubfreight_lib::{Catalog, Error as LibError, Order, quote};
use hubfreight_service_shared::{
    AppState, MetricsConfig, MetricsLayer, OrderRequest, PROBLEM_UNKNOWN_PRODUCT, ProblemDetails,
    RequestId, extract_or_generate_request_id, failure_reason, from_lib_error, health_live,
    health_ready, metrics_handler, record_candidate_paths, record_quote_calculated,
    record_quote_cost, record_quote_failed,
};

/// Service label used for logging and metrics.
pub const SERVICE_NAME: &str = "delivery";

pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Read `HUBFREIGHT_CATALOG_PATH` and `SERVICE_PORT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable ports fall back to [`DEFAULT_PORT`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_path = lookup("HUBFREIGHT_CATALOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let port = lookup("SERVICE_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { catalog_path, port }
    }
}

/// Successful quote returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryCostResponse {
    pub minimum_cost: f64,
    pub optimal_path: Vec<String>,
}

/// HTTP response: a quote or an RFC 9457 error.
#[derive(Debug)]
pub enum Response {
    Success(DeliveryCostResponse),
    Error(Box<ProblemDetails>),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => (*problem).into_response(),
        }
    }
}

/// Build the service router.
///
/// The metrics endpoint is mounted at `metrics.path`, and only when metrics
/// are enabled.
pub fn app(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router: Router<AppState> = Router::new()
        .route("/api/calculate-delivery-cost", post(calculate_delivery_cost))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));
    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `POST /api/calculate-delivery-cost`.
///
/// The body is read raw so that a missing body reports the same
/// "No order data provided" error as an empty object.
pub async fn calculate_delivery_cost(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);
    let request_id = request_id.as_str();

    let order = match parse_order(&body, state.catalog(), request_id) {
        Ok(order) => order,
        Err(problem) => {
            warn!(request_id, error = %problem, "rejected order payload");
            let reason = if problem.type_uri == PROBLEM_UNKNOWN_PRODUCT {
                "unknown_product"
            } else {
                "validation_error"
            };
            record_quote_failed(reason, SERVICE_NAME);
            return Response::Error(problem);
        }
    };

    info!(request_id, products = order.len(), "handling delivery cost request");

    let quote = match quote(state.catalog(), &order) {
        Ok(quote) => quote,
        Err(e) => return quote_failed(&e, request_id),
    };

    record_quote_calculated(SERVICE_NAME);
    record_candidate_paths(quote.candidates);
    record_quote_cost(quote.minimum_cost);

    info!(
        request_id,
        minimum_cost = quote.minimum_cost,
        legs = quote.leg_count(),
        candidates = quote.candidates,
        "quote computed successfully"
    );

    Response::Success(DeliveryCostResponse {
        minimum_cost: quote.minimum_cost,
        optimal_path: quote.optimal_path,
    })
}

fn parse_order(
    body: &[u8],
    catalog: &Catalog,
    request_id: &str,
) -> Result<Order, Box<ProblemDetails>> {
    OrderRequest::from_bytes(body, request_id)?.to_order(catalog, request_id)
}

fn quote_failed(error: &LibError, request_id: &str) -> Response {
    let problem = from_lib_error(error, request_id);
    if problem.status_code().is_server_error() {
        error!(request_id, error = %error, "quote failed");
    } else {
        warn!(request_id, error = %error, "quote rejected");
    }
    record_quote_failed(failure_reason(error), SERVICE_NAME);
    Response::Error(Box::new(problem))
}

/// Turn a handler panic into a 500 problem response.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %message, "request handler panicked");
    record_quote_failed("internal_error", SERVICE_NAME);

    ProblemDetails::internal_error(
        format!("Unexpected error: {}", message),
        RequestId::generate().as_str(),
    )
    .into_response()
}
