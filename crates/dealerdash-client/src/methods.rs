//! Upstream DealerBuilt CDX method names used by the dashboard.

/// Vehicle deals in a date range.
pub const PULL_DEALS: &str = "PullDeals";
/// Vehicle inventory.
pub const PULL_INVENTORY: &str = "PullInventory";
/// Service repair orders in a date range.
pub const PULL_REPAIR_ORDERS: &str = "PullRepairOrders";
/// Service appointments in a date range.
pub const PULL_APPOINTMENTS: &str = "PullAppointments";
/// Parts inventory.
pub const PULL_PARTS_INVENTORY: &str = "PullPartsInventory";
/// Customer records, bounded by `MaxRecords`.
pub const PULL_CUSTOMERS: &str = "PullCustomers";
/// Cheapest call, used for connection checks.
pub const GET_DIVISIONS: &str = "GetDivisions";

/// Date range start parameter.
pub const START_DATE: &str = "StartDate";
/// Date range end parameter.
pub const END_DATE: &str = "EndDate";
/// Record limit parameter.
pub const MAX_RECORDS: &str = "MaxRecords";
