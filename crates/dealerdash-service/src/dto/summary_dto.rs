//! Department summary views.

use serde::{Deserialize, Serialize};

/// A figure tracked against the previous period and a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMetric<T> {
    pub current: T,
    pub previous: T,
    pub target: T,
}

/// Revenue with its recent trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueMetric {
    pub current: u64,
    pub previous: u64,
    pub target: u64,
    pub trend: Vec<u64>,
}

/// A department's share of total revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentShare {
    pub name: String,
    pub revenue: u64,
    pub percentage: u32,
}

/// Per-rooftop performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPerformance {
    pub name: String,
    pub revenue: u64,
    pub units: u32,
    pub efficiency: u32,
}

/// Executive dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub revenue: RevenueMetric,
    pub units: TargetMetric<u32>,
    pub gross_profit: TargetMetric<u64>,
    pub customer_satisfaction: TargetMetric<f64>,
    pub departments: Vec<DepartmentShare>,
    pub locations: Vec<LocationPerformance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianCount {
    pub active: u32,
    pub total: u32,
}

/// Service department dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub active_ros: u32,
    pub todays_appointments: u32,
    pub avg_cycle_time: String,
    pub technicians: TechnicianCount,
    pub pending_checkin: u32,
    pub efficiency_trend: Vec<u32>,
}

/// Sales department dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub active_deals: u32,
    pub monthly_sales: u32,
    pub inventory_count: u32,
    pub avg_deal_value: u64,
    pub conversion_rate: f64,
    pub pipeline_value: u64,
}

/// A fast-moving part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartMover {
    pub part: String,
    pub quantity: u32,
    pub revenue: u64,
}

/// Parts department dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartsSummary {
    pub total_parts: u32,
    pub low_stock_items: u32,
    pub pending_orders: u32,
    pub monthly_revenue: u64,
    pub top_movers: Vec<PartMover>,
}
