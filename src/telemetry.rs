use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize structured logging on stderr, leaving stdout to command output.
/// RUST_LOG takes precedence over the configured level.
pub fn init_telemetry(observability: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&observability.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);

    if observability.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::info!(
        json_logs = observability.json_logs,
        "Burr counter telemetry initialized"
    );
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one request
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span for one HTTP request
pub fn create_request_span(route: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        route = route,
        correlation.id = correlation_id,
        otel.kind = "server"
    )
}

/// Shutdown telemetry gracefully
pub fn shutdown_telemetry() {
    // fmt layers flush on every write
    tracing::info!("Burr counter telemetry shutdown complete");
}
