//! Shared infrastructure for hubfreight HTTP microservices.
//!
//! This crate provides the HTTP glue around `hubfreight-lib`:
//!
//! - [`AppState`]: The loaded, read-only supply-center catalog
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details carrying an `error` message
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - [`OrderRequest`]: Order payload parsing and validation
//!
//! # Architecture
//!
//! Handlers stay thin; all pricing logic lives in `hubfreight-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse the order body                                     │
//! │  - Validate quantities and products                         │
//! │  - Call hubfreight_lib::quote                               │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a reference-catalog state and request
//! helpers. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_candidate_paths, record_quote_calculated,
    record_quote_cost, record_quote_failed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    failure_reason, from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_UNKNOWN_PRODUCT,
};
pub use request::OrderRequest;
pub use state::{AppState, AppStateError};
