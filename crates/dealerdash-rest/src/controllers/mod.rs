//! HTTP controllers.

pub mod analytics_controller;
pub mod cache_controller;
pub mod dashboard_controller;
pub mod health_controller;
pub mod realtime_controller;
