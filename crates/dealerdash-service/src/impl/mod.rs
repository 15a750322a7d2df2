//! Service implementations.

mod dashboard_service_impl;

pub use dashboard_service_impl::DashboardServiceImpl;
