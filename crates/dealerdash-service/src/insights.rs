//! Illustrative real-time and analytics figures.
//!
//! None of these are backed by upstream data yet.

use crate::dto::{
    Alert, AlertKind, AlertPriority, Department, KpiBoard, Trend, TrendMetric, TrendPeriod,
};
use chrono::{DateTime, Utc};
use serde_json::json;

/// Current alerts, stamped with `now`.
#[must_use]
pub fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    let alert = |id: &str,
                 kind: AlertKind,
                 title: &str,
                 message: &str,
                 priority: AlertPriority,
                 department: Department| Alert {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        priority,
        timestamp: now,
        department,
    };

    vec![
        alert(
            "alert_001",
            AlertKind::Warning,
            "Service Capacity Alert",
            "Service capacity at 95% for next week",
            AlertPriority::High,
            Department::Service,
        ),
        alert(
            "alert_002",
            AlertKind::Success,
            "Sales Target Achieved",
            "Q1 sales target achieved - 102% of goal",
            AlertPriority::Medium,
            Department::Sales,
        ),
        alert(
            "alert_003",
            AlertKind::Error,
            "Low Parts Inventory",
            "Oil filters running low - 5 units remaining",
            AlertPriority::High,
            Department::Parts,
        ),
        alert(
            "alert_004",
            AlertKind::Info,
            "Customer Satisfaction Update",
            "Customer satisfaction improved by 4% this month",
            AlertPriority::Low,
            Department::Service,
        ),
    ]
}

fn department_kpis(department: Department) -> serde_json::Value {
    match department {
        Department::Executive => json!({
            "revenue": {"current": 2_847_500, "change": 7.3, "target_progress": 95},
            "units": {"current": 156, "change": 9.9, "target_progress": 87},
            "gross_profit": {"current": 487_200, "change": 9.3, "target_progress": 94},
            "csi": {"current": 4.7, "change": 4.4, "target_progress": 98}
        }),
        Department::Service => json!({
            "active_ros": {"current": 47, "change": 12.0},
            "appointments": {"current": 23, "pending": 8},
            "cycle_time": {"current": 2.4, "change": -6.3},
            "technicians": {"active": 12, "total": 14}
        }),
        Department::Sales => json!({
            "active_deals": {"current": 23, "change": 15.0},
            "monthly_sales": {"current": 156, "change": 9.9},
            "conversion_rate": {"current": 0.23, "change": 2.2},
            "pipeline_value": {"current": 2_400_000, "change": 8.5}
        }),
        Department::Parts => json!({
            "inventory_value": {"current": 1_250_000, "change": -2.1},
            "low_stock_items": {"current": 23, "change": 15.0},
            "monthly_revenue": {"current": 312_800, "change": 5.7},
            "turnover_rate": {"current": 6.2, "change": 3.2}
        }),
    }
}

/// KPIs for one department, or for all of them.
#[must_use]
pub fn kpis(department: Option<Department>) -> KpiBoard {
    match department {
        Some(d) => KpiBoard::from([(d, department_kpis(d))]),
        None => Department::ALL
            .into_iter()
            .map(|d| (d, department_kpis(d)))
            .collect(),
    }
}

/// Trend series for `metric` at the granularity `period` maps to.
#[must_use]
pub fn trend(metric: TrendMetric, period: &str) -> Trend {
    let granularity = TrendPeriod::from_label(period);
    let values: &[u64] = match (metric, granularity) {
        (TrendMetric::Revenue, TrendPeriod::Daily) => {
            &[85_000, 92_000, 88_000, 95_000, 91_000, 87_000, 93_000]
        }
        (TrendMetric::Revenue, TrendPeriod::Weekly) => &[580_000, 620_000, 595_000, 640_000],
        (TrendMetric::Revenue, TrendPeriod::Monthly) => {
            &[2_200_000, 2_350_000, 2_654_000, 2_847_500]
        }
        (TrendMetric::Units, TrendPeriod::Daily) => &[4, 5, 3, 6, 4, 3, 5],
        (TrendMetric::Units, TrendPeriod::Weekly) => &[28, 32, 29, 35],
        (TrendMetric::Units, TrendPeriod::Monthly) => &[120, 128, 142, 156],
        (TrendMetric::ServiceEfficiency, TrendPeriod::Daily) => &[88, 92, 85, 94, 89, 87, 91],
        (TrendMetric::ServiceEfficiency, TrendPeriod::Weekly) => &[89, 91, 88, 92],
        (TrendMetric::ServiceEfficiency, TrendPeriod::Monthly) => &[85, 88, 92, 89],
    };

    Trend {
        metric,
        period: period.to_string(),
        granularity,
        values: values.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts() {
        let now = Utc::now();
        let alerts = alerts(now);
        assert_eq!(alerts.len(), 4);
        assert!(alerts.iter().all(|a| a.timestamp == now));
        assert_eq!(alerts[2].department, Department::Parts);
    }

    #[test]
    fn test_kpis_filter() {
        let all = kpis(None);
        assert_eq!(all.len(), 4);

        let service = kpis(Some(Department::Service));
        assert_eq!(service.len(), 1);
        assert_eq!(service[&Department::Service]["active_ros"]["current"], 47);
    }

    #[test]
    fn test_trend_selection() {
        let weekly = trend(TrendMetric::Units, "4w");
        assert_eq!(weekly.granularity, TrendPeriod::Weekly);
        assert_eq!(weekly.values, vec![28, 32, 29, 35]);
        assert_eq!(weekly.period, "4w");

        let default = trend(TrendMetric::default(), "30d");
        assert_eq!(default.values.len(), 7);
        assert_eq!(default.values[0], 85_000);
    }
}
