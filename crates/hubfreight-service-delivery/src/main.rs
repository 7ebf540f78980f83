use std::net::SocketAddr;

use tracing::{error, info, warn};

use hubfreight_service_delivery::{SERVICE_NAME, ServiceConfig, app};
use hubfreight_service_shared::{
    AppState, LoggingConfig, MetricsConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service(SERVICE_NAME);
    init_logging(&logging_config)?;

    // Metrics are optional; the service keeps running without them.
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        catalog_path = ?config.catalog_path,
        port = config.port,
        "starting delivery service"
    );

    let state = AppState::load_or_reference(config.catalog_path.as_deref()).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(
        centers = state.catalog().len(),
        hub = %state.catalog().hub(),
        "application state loaded"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, metrics_path = %metrics_config.path, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state, &metrics_config)).await?;

    Ok(())
}
