//! Prometheus metrics for the hubfreight services.
//!
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler for the `/metrics` endpoint
//! - Quote helpers recorded by the delivery handler
//!
//! # Example
//!
//! ```no_run
//! use hubfreight_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::from_env();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Bucket boundaries for the `hubfreight_quote_cost` histogram.
const QUOTE_COST_BUCKETS: &[f64] = &[10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 5000.0];

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Route the metrics endpoint is mounted at (default: "/metrics")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let path = match lookup("METRICS_PATH").as_deref().map(str::trim) {
            None | Some("") => "/metrics".to_string(),
            // Router paths must be absolute.
            Some(p) if p.starts_with('/') => p.to_string(),
            Some(p) => format!("/{}", p),
        };

        Self { enabled, path }
    }
}

/// Install the Prometheus metrics recorder.
///
/// Call once at startup, before any metric is recorded.
///
/// # Errors
///
/// - [`MetricsError::Disabled`] when metrics are turned off
/// - [`MetricsError::AlreadyInitialized`] on a second call
/// - [`MetricsError::InstallFailed`] when the builder cannot install
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("hubfreight_quote_cost".to_string()),
            QUOTE_COST_BUCKETS,
        )
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Returns `None` until [`init_metrics`] has succeeded.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint (Prometheus exposition text).
pub async fn metrics_handler() -> String {
    prometheus_handle()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Quote Metrics Helpers
// =============================================================================

/// Increment `hubfreight_quotes_calculated_total` for a successful quote.
pub fn record_quote_calculated(service: &str) {
    metrics::counter!(
        "hubfreight_quotes_calculated_total",
        "service" => service.to_string()
    )
    .increment(1);
}

/// Increment `hubfreight_quotes_failed_total`.
///
/// # Arguments
///
/// * `reason` - Failure label such as "unknown_product", "validation_error" or "no_path"
/// * `service` - The service name (e.g., "delivery")
pub fn record_quote_failed(reason: &str, service: &str) {
    metrics::counter!(
        "hubfreight_quotes_failed_total",
        "reason" => reason.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record how many candidate paths were priced for one quote.
pub fn record_candidate_paths(count: usize) {
    metrics::histogram!("hubfreight_candidate_paths").record(count as f64);
}

/// Record the minimum cost of a successful quote.
pub fn record_quote_cost(cost: f64) {
    metrics::histogram!("hubfreight_quote_cost").record(cost);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        let vars: HashMap<&str, &str> =
            [("METRICS_ENABLED", "FALSE"), ("METRICS_PATH", "/prom")].into();
        let config = MetricsConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert!(!config.enabled);
        assert_eq!(config.path, "/prom");

        let config = MetricsConfig::from_lookup(|_| None);
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_path_is_made_absolute() {
        let config = MetricsConfig::from_lookup(|key| {
            (key == "METRICS_PATH").then(|| "internal/prom".to_string())
        });
        assert_eq!(config.path, "/internal/prom");

        let config =
            MetricsConfig::from_lookup(|key| (key == "METRICS_PATH").then(|| "  ".to_string()));
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert_eq!(init_metrics(&config), Err(MetricsError::Disabled));
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_prometheus_format() {
        let output = metrics_handler().await;
        assert!(output.contains('#') || output.is_empty());
    }

    // The helpers must be callable without an installed recorder.
    #[test]
    fn test_quote_helpers_without_recorder() {
        record_quote_calculated("delivery");
        record_quote_failed("unknown_product", "delivery");
        record_quote_failed("validation_error", "delivery");
        record_candidate_paths(7);
        record_quote_cost(148.0);
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );
        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
