//! Real-time alerts and KPIs.

use crate::{
    extractors::ApiQuery,
    responses::{ok, ok_list, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::get,
    Router,
};
use dealerdash_service::{Alert, Department, KpiBoard};
use serde::Deserialize;

/// Creates the real-time router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/realtime/alerts", get(alerts))
        .route("/realtime/kpis", get(kpis))
}

/// `department` is `all` (the default) or a department name.
#[derive(Debug, Default, Deserialize)]
pub struct KpiQuery {
    pub department: Option<String>,
}

async fn alerts(State(state): State<AppState>) -> ApiResult<Vec<Alert>> {
    ok_list(state.dashboard_service.get_alerts())
}

async fn kpis(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<KpiQuery>,
) -> ApiResult<KpiBoard> {
    let department = query.department.as_deref().and_then(Department::from_filter);
    ok(state.dashboard_service.get_kpis(department))
}
