//! Record lists and utility results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`.
    pub last_visit: String,
    pub total_spent: u64,
    pub vehicle_count: u32,
}

/// Vehicle in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vin: String,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub price: u64,
    pub status: String,
    pub days_in_stock: u32,
    pub location: String,
}

/// Outcome of a connection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Success,
    Error,
}

/// Connection check report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: ConnectionState,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConnectionStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ConnectionState::Success
    }
}

/// Result of purging the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheClearResult {
    pub cleared: usize,
}
