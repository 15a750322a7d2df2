//! Analytics trends.

use crate::{
    extractors::ApiQuery,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::State,
    routing::get,
    Router,
};
use dealerdash_service::{Trend, TrendMetric};
use serde::Deserialize;

const DEFAULT_PERIOD: &str = "30d";

/// Creates the analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/analytics/trends", get(trends))
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    pub metric: Option<String>,
    pub period: Option<String>,
}

async fn trends(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TrendQuery>,
) -> ApiResult<Trend> {
    let metric = query
        .metric
        .as_deref()
        .map(TrendMetric::from_label)
        .unwrap_or_default();
    let period = query.period.as_deref().unwrap_or(DEFAULT_PERIOD);

    ok(state.dashboard_service.get_trends(metric, period))
}
