//! Application state for Axum handlers.

use dealerdash_service::DashboardService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: Arc<dyn DashboardService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(dashboard_service: Arc<dyn DashboardService>) -> Self {
        Self { dashboard_service }
    }
}
