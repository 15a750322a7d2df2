//! Logging and metrics setup.

use dealerdash_config::ObservabilityConfig;
use dealerdash_core::{DashError, DashResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Installs the global Prometheus recorder and describes the client metrics.
pub fn install_metrics_recorder() -> DashResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        DashError::Configuration(format!("Failed to install metrics recorder: {}", e))
    })?;
    dealerdash_client::metrics::register_metrics();
    Ok(handle)
}
