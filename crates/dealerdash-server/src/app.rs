//! HTTP application assembly.

use crate::di::ServiceContainer;
use axum::{routing::get, Router};
use dealerdash_config::AppConfig;
use dealerdash_rest::{create_router, responses, AppState};
use metrics_exporter_prometheus::PrometheusHandle;

/// Builds the full router: dashboard API plus the metrics endpoint when a
/// recorder is installed and metrics are enabled.
pub fn build_router(
    container: &ServiceContainer,
    config: &AppConfig,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let router = create_router(AppState::new(container.dashboard_service()), &config.server);

    match metrics {
        Some(handle) if config.observability.metrics_enabled => router
            .route(
                &config.observability.metrics_path,
                get(move || async move { handle.render() }),
            )
            .method_not_allowed_fallback(responses::method_not_allowed),
        _ => router,
    }
}
