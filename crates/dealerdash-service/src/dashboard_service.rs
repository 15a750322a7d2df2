//! Dashboard service trait definition.

use crate::dto::{
    Alert, CacheClearResult, ConnectionStatus, Customer, Department, ExecutiveSummary, KpiBoard,
    PartsSummary, SalesSummary, ServiceSummary, Trend, TrendMetric, Vehicle,
};
use async_trait::async_trait;
use dealerdash_core::DashResult;

/// Default number of customers returned when no limit is given.
pub const DEFAULT_CUSTOMER_LIMIT: u32 = 100;

/// Dashboard service trait.
///
/// Upstream failures surface as errors; nothing here substitutes
/// placeholder data when the DMS is unavailable.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Executive overview: revenue, units, gross profit and satisfaction.
    async fn get_executive_summary(&self) -> DashResult<ExecutiveSummary>;

    /// Today's service department activity.
    async fn get_service_summary(&self) -> DashResult<ServiceSummary>;

    /// Sales activity over the last 30 days.
    async fn get_sales_summary(&self) -> DashResult<SalesSummary>;

    /// Parts department overview.
    async fn get_parts_summary(&self) -> DashResult<PartsSummary>;

    /// Up to `limit` customers.
    async fn get_customers(&self, limit: u32) -> DashResult<Vec<Customer>>;

    /// Vehicles in stock.
    async fn get_inventory(&self) -> DashResult<Vec<Vehicle>>;

    /// Checks the DMS connection. Never fails; the outcome is in the report.
    async fn test_connection(&self) -> ConnectionStatus;

    /// Purges cached upstream responses.
    fn clear_cache(&self) -> CacheClearResult;

    fn get_alerts(&self) -> Vec<Alert>;

    /// KPIs for a department, or all departments when `None`.
    fn get_kpis(&self, department: Option<Department>) -> KpiBoard;

    fn get_trends(&self, metric: TrendMetric, period: &str) -> Trend;
}
