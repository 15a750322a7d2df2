//! Department summaries, customer and inventory lists, connection check.

use crate::{
    extractors::ApiQuery,
    responses::{ok, ok_list, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use dealerdash_service::{
    ConnectionStatus, Customer, ExecutiveSummary, PartsSummary, SalesSummary, ServiceSummary,
    Vehicle, DEFAULT_CUSTOMER_LIMIT,
};
use serde::Deserialize;
use tracing::debug;

/// Creates the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/test-connection", get(test_connection))
        .route("/executive/summary", get(executive_summary))
        .route("/service/summary", get(service_summary))
        .route("/sales/summary", get(sales_summary))
        .route("/parts/summary", get(parts_summary))
        .route("/customers", get(customers))
        .route("/inventory", get(inventory))
}

/// Query string for the customer list.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub limit: Option<String>,
}

impl CustomersQuery {
    /// Resolves the limit. Absent or non-integer values use the default;
    /// negative values mean no records.
    #[must_use]
    pub fn limit(&self) -> u32 {
        match self.limit.as_deref().map(str::trim).map(str::parse::<i64>) {
            Some(Ok(n)) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
            None | Some(Err(_)) => DEFAULT_CUSTOMER_LIMIT,
        }
    }
}

/// Checks the DMS connection. Always 200; the outcome is in the body.
async fn test_connection(State(state): State<AppState>) -> Json<ConnectionStatus> {
    debug!("Connection test request");
    Json(state.dashboard_service.test_connection().await)
}

async fn executive_summary(State(state): State<AppState>) -> ApiResult<ExecutiveSummary> {
    ok(state.dashboard_service.get_executive_summary().await?)
}

async fn service_summary(State(state): State<AppState>) -> ApiResult<ServiceSummary> {
    ok(state.dashboard_service.get_service_summary().await?)
}

async fn sales_summary(State(state): State<AppState>) -> ApiResult<SalesSummary> {
    ok(state.dashboard_service.get_sales_summary().await?)
}

async fn parts_summary(State(state): State<AppState>) -> ApiResult<PartsSummary> {
    ok(state.dashboard_service.get_parts_summary().await?)
}

async fn customers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CustomersQuery>,
) -> ApiResult<Vec<Customer>> {
    let limit = query.limit();
    debug!(limit, "Customer list request");

    ok_list(state.dashboard_service.get_customers(limit).await?)
}

async fn inventory(State(state): State<AppState>) -> ApiResult<Vec<Vehicle>> {
    ok_list(state.dashboard_service.get_inventory().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> CustomersQuery {
        CustomersQuery {
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(query(None).limit(), 100);
        assert_eq!(query(Some("")).limit(), 100);
        assert_eq!(query(Some("25")).limit(), 25);
        assert_eq!(query(Some(" 7 ")).limit(), 7);
        assert_eq!(query(Some("ten")).limit(), 100);
        assert_eq!(query(Some("2.5")).limit(), 100);
        assert_eq!(query(Some("-5")).limit(), 0);
        assert_eq!(query(Some("99999999999")).limit(), u32::MAX);
    }
}
