//! Real-time and analytics views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

/// Dashboard department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Executive,
    Service,
    Sales,
    Parts,
}

impl Department {
    pub const ALL: [Self; 4] = [Self::Executive, Self::Service, Self::Sales, Self::Parts];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::Service => "service",
            Self::Sales => "sales",
            Self::Parts => "parts",
        }
    }

    /// Parses a department filter. `all` and unknown labels mean no filter.
    #[must_use]
    pub fn from_filter(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

/// Real-time alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub priority: AlertPriority,
    pub timestamp: DateTime<Utc>,
    pub department: Department,
}

/// KPI figures grouped by department. Each department has its own set of
/// indicators, so the figures themselves are free-form JSON.
pub type KpiBoard = BTreeMap<Department, serde_json::Value>;

/// Metric a trend can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    #[default]
    Revenue,
    Units,
    ServiceEfficiency,
}

impl TrendMetric {
    /// Unknown metrics fall back to revenue.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "units" => Self::Units,
            "service_efficiency" => Self::ServiceEfficiency,
            _ => Self::Revenue,
        }
    }
}

/// Trend granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TrendPeriod {
    /// Maps a period label to a granularity by its unit suffix: `7d` and
    /// `daily` are daily, `4w` weekly, `m` monthly. Anything else is daily.
    ///
    /// A count in front of the unit is ignored, so `4w` and `12m` keep their
    /// unit rather than only the bare `w` and `m` labels matching.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            other => match other.trim_start_matches(|c: char| c.is_ascii_digit()) {
                "w" => Self::Weekly,
                "m" => Self::Monthly,
                _ => Self::Daily,
            },
        }
    }
}

/// Trend series for one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub metric: TrendMetric,
    /// The period label as requested.
    pub period: String,
    pub granularity: TrendPeriod,
    pub values: Vec<u64>,
}
