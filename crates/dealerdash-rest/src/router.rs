//! Main application router.

use crate::{
    controllers::{
        analytics_controller, cache_controller, dashboard_controller, health_controller,
        realtime_controller,
    },
    middleware::logging_middleware,
    responses,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, Router};
use dealerdash_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router.
///
/// Dashboard routes are mounted under `server_config.api_prefix`; `/health`
/// is also served at the root.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .merge(health_controller::router())
        .merge(dashboard_controller::router())
        .merge(realtime_controller::router())
        .merge(analytics_controller::router())
        .merge(cache_controller::router());

    let prefix = server_config.api_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        api_router
    } else {
        Router::new()
            .merge(health_controller::router())
            .nest(prefix, api_router)
    };

    let router = router
        .fallback(responses::not_found)
        .method_not_allowed_fallback(responses::method_not_allowed)
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state);

    info!(prefix = %server_config.api_prefix, "Router created with dashboard endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::Utc;
    use dealerdash_core::{DashError, DashResult};
    use dealerdash_service::{
        insights, Alert, CacheClearResult, ConnectionState, ConnectionStatus, Customer,
        DashboardService, Department, ExecutiveSummary, KpiBoard, PartsSummary, SalesSummary,
        ServiceSummary, TechnicianCount, Trend, TrendMetric, Vehicle,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Serves fixed data, or fails every upstream-backed call with `failure`.
    #[derive(Default)]
    struct StubDashboard {
        failure: Option<DashError>,
        last_limit: AtomicU32,
    }

    impl StubDashboard {
        fn failing(error: DashError) -> Self {
            Self {
                failure: Some(error),
                ..Self::default()
            }
        }

        fn check(&self) -> DashResult<()> {
            self.failure.clone().map_or(Ok(()), Err)
        }
    }

    #[async_trait]
    impl DashboardService for StubDashboard {
        async fn get_executive_summary(&self) -> DashResult<ExecutiveSummary> {
            self.check()?;
            Err(DashError::internal("not used"))
        }

        async fn get_service_summary(&self) -> DashResult<ServiceSummary> {
            self.check()?;
            Ok(ServiceSummary {
                active_ros: 47,
                todays_appointments: 23,
                avg_cycle_time: "2.4h".to_string(),
                technicians: TechnicianCount { active: 12, total: 14 },
                pending_checkin: 8,
                efficiency_trend: vec![85, 88],
            })
        }

        async fn get_sales_summary(&self) -> DashResult<SalesSummary> {
            self.check()?;
            Err(DashError::internal("not used"))
        }

        async fn get_parts_summary(&self) -> DashResult<PartsSummary> {
            self.check()?;
            Err(DashError::internal("not used"))
        }

        async fn get_customers(&self, limit: u32) -> DashResult<Vec<Customer>> {
            self.check()?;
            self.last_limit.store(limit, Ordering::SeqCst);
            Ok((1..=limit.min(3))
                .map(|i| Customer {
                    id: format!("CUST_{:04}", i),
                    name: format!("Customer {}", i),
                    email: String::new(),
                    phone: String::new(),
                    last_visit: "2024-04-16".to_string(),
                    total_spent: 0,
                    vehicle_count: 1,
                })
                .collect())
        }

        async fn get_inventory(&self) -> DashResult<Vec<Vehicle>> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn test_connection(&self) -> ConnectionStatus {
            let (status, message) = match &self.failure {
                Some(e) => (ConnectionState::Error, e.to_string()),
                None => (ConnectionState::Success, "Connection successful".to_string()),
            };
            ConnectionStatus {
                status,
                message,
                timestamp: Utc::now(),
            }
        }

        fn clear_cache(&self) -> CacheClearResult {
            CacheClearResult { cleared: 4 }
        }

        fn get_alerts(&self) -> Vec<Alert> {
            insights::alerts(Utc::now())
        }

        fn get_kpis(&self, department: Option<Department>) -> KpiBoard {
            insights::kpis(department)
        }

        fn get_trends(&self, metric: TrendMetric, period: &str) -> Trend {
            insights::trend(metric, period)
        }
    }

    fn app(service: StubDashboard) -> Router {
        create_router(AppState::new(Arc::new(service)), &ServerConfig::default())
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_at_root_and_prefix() {
        for uri in ["/health", "/api/dashboard/health"] {
            let (status, body) = send(app(StubDashboard::default()), "GET", uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "healthy");
            assert_eq!(body["service"], "DealerBuilt Dashboard API");
            assert!(body["version"].is_string());
        }
    }

    #[tokio::test]
    async fn test_summary_envelope() {
        let (status, body) =
            send(app(StubDashboard::default()), "GET", "/api/dashboard/service/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["active_ros"], 47);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_upstream_timeout_maps_to_504() {
        let service = StubDashboard::failing(DashError::Timeout("no reply after 30s".to_string()));
        let (status, body) = send(app(service), "GET", "/api/dashboard/service/summary").await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "UPSTREAM_TIMEOUT");
        assert!(body["message"].as_str().unwrap().contains("no reply"));
    }

    #[tokio::test]
    async fn test_malformed_upstream_maps_to_502() {
        let service = StubDashboard::failing(DashError::normalization("no root element"));
        let (status, body) = send(app(service), "GET", "/api/dashboard/inventory").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_customers_limit_and_count() {
        let (status, body) =
            send(app(StubDashboard::default()), "GET", "/api/dashboard/customers?limit=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_customers_default_limit() {
        let service = Arc::new(StubDashboard::default());
        let router = create_router(AppState::new(service.clone()), &ServerConfig::default());

        let (status, _) = send(router, "GET", "/api/dashboard/customers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(service.last_limit.load(Ordering::SeqCst), 100);
    }

    #[tokio::test]
    async fn test_customers_non_integer_limit_uses_default() {
        let service = Arc::new(StubDashboard::default());
        let router = create_router(AppState::new(service.clone()), &ServerConfig::default());

        let (status, body) = send(router, "GET", "/api/dashboard/customers?limit=lots").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(service.last_limit.load(Ordering::SeqCst), 100);
    }

    #[tokio::test]
    async fn test_customers_negative_limit_is_empty() {
        let (status, body) =
            send(app(StubDashboard::default()), "GET", "/api/dashboard/customers?limit=-5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_query_is_enveloped_400() {
        let (status, body) = send(
            app(StubDashboard::default()),
            "GET",
            "/api/dashboard/customers?limit=1&limit=2",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("limit"));
    }

    #[tokio::test]
    async fn test_wrong_method_is_enveloped_405() {
        let (status, body) =
            send(app(StubDashboard::default()), "GET", "/api/dashboard/cache/clear").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Method not allowed");
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");

        let (status, _) =
            send(app(StubDashboard::default()), "DELETE", "/api/dashboard/inventory").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_connection_always_200() {
        let service = StubDashboard::failing(DashError::Connection("refused".to_string()));
        let (status, body) = send(app(service), "GET", "/api/dashboard/test-connection").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("refused"));
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let (status, body) =
            send(app(StubDashboard::default()), "POST", "/api/dashboard/cache/clear").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["cleared"], 4);
        assert_eq!(body["message"], "Cleared 4 cached items");
    }

    #[tokio::test]
    async fn test_alerts_and_kpis() {
        let (_, body) = send(app(StubDashboard::default()), "GET", "/api/dashboard/realtime/alerts").await;
        assert_eq!(body["count"], 4);

        let (_, body) = send(
            app(StubDashboard::default()),
            "GET",
            "/api/dashboard/realtime/kpis?department=parts",
        )
        .await;
        let data = body["data"].as_object().unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.contains_key("parts"));

        let (_, body) = send(
            app(StubDashboard::default()),
            "GET",
            "/api/dashboard/realtime/kpis?department=all",
        )
        .await;
        assert_eq!(body["data"].as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_trends_defaults() {
        let (status, body) =
            send(app(StubDashboard::default()), "GET", "/api/dashboard/analytics/trends").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["metric"], "revenue");
        assert_eq!(body["data"]["period"], "30d");
        assert_eq!(body["data"]["values"].as_array().unwrap().len(), 7);

        let (_, body) = send(
            app(StubDashboard::default()),
            "GET",
            "/api/dashboard/analytics/trends?metric=units&period=m",
        )
        .await;
        assert_eq!(body["data"]["granularity"], "monthly");
        assert_eq!(body["data"]["values"][3], 156);
    }

    #[tokio::test]
    async fn test_unknown_route_is_enveloped_404() {
        let (status, body) = send(app(StubDashboard::default()), "GET", "/api/dashboard/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Endpoint not found");
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
