//! Cache maintenance.

use crate::{
    responses::{ApiEnvelope, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use dealerdash_service::CacheClearResult;
use tracing::info;

/// Creates the cache router.
pub fn router() -> Router<AppState> {
    Router::new().route("/cache/clear", post(clear_cache))
}

async fn clear_cache(State(state): State<AppState>) -> ApiResult<CacheClearResult> {
    let result = state.dashboard_service.clear_cache();
    info!(cleared = result.cleared, "Cache cleared via API");

    let message = format!("Cleared {} cached items", result.cleared);
    Ok(Json(ApiEnvelope::success(result).with_message(message)))
}
