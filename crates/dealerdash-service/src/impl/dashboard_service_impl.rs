//! Dashboard service implementation.

use crate::calendar::{self, Calendar, LocalCalendar};
use crate::dashboard_service::DashboardService;
use crate::dto::{
    Alert, CacheClearResult, ConnectionState, ConnectionStatus, Customer, Department,
    DepartmentShare, ExecutiveSummary, KpiBoard, LocationPerformance, PartMover, PartsSummary,
    RevenueMetric, SalesSummary, ServiceSummary, TargetMetric, TechnicianCount, Trend,
    TrendMetric, Vehicle,
};
use crate::insights;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dealerdash_client::{methods, DmsApi, Parameters};
use dealerdash_core::DashResult;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Customers are capped at this many records.
const MAX_CUSTOMERS: u32 = 50;
const INVENTORY_SIZE: u32 = 20;

/// Dashboard service implementation backed by the DMS client.
pub struct DashboardServiceImpl {
    dms: Arc<dyn DmsApi>,
    calendar: Arc<dyn Calendar>,
}

impl DashboardServiceImpl {
    /// Creates a new dashboard service using the local date.
    pub fn new(dms: Arc<dyn DmsApi>) -> Self {
        Self::with_calendar(dms, Arc::new(LocalCalendar))
    }

    /// Creates a new dashboard service with an explicit date source.
    pub fn with_calendar(dms: Arc<dyn DmsApi>, calendar: Arc<dyn Calendar>) -> Self {
        Self { dms, calendar }
    }

    fn date_range(from: NaiveDate, to: NaiveDate) -> Parameters {
        Parameters::new()
            .with(methods::START_DATE, calendar::format_date(from))
            .with(methods::END_DATE, calendar::format_date(to))
    }
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
    #[instrument(skip(self))]
    async fn get_executive_summary(&self) -> DashResult<ExecutiveSummary> {
        let today = self.calendar.today();

        let (deals, inventory, repair_orders) = tokio::try_join!(
            self.dms.call(
                methods::PULL_DEALS,
                Self::date_range(calendar::start_of_year(today), today)
            ),
            self.dms.call(methods::PULL_INVENTORY, Parameters::new()),
            self.dms.call(
                methods::PULL_REPAIR_ORDERS,
                Self::date_range(calendar::start_of_month(today), today)
            ),
        )?;
        debug!(
            deals = deals.len(),
            inventory = inventory.len(),
            repair_orders = repair_orders.len(),
            "Fetched executive datasets"
        );

        Ok(ExecutiveSummary {
            revenue: RevenueMetric {
                current: 2_847_500,
                previous: 2_654_000,
                target: 3_000_000,
                trend: vec![2_200_000, 2_350_000, 2_654_000, 2_847_500],
            },
            units: TargetMetric {
                current: 156,
                previous: 142,
                target: 180,
            },
            gross_profit: TargetMetric {
                current: 487_200,
                previous: 445_800,
                target: 520_000,
            },
            customer_satisfaction: TargetMetric {
                current: 4.7,
                previous: 4.5,
                target: 4.8,
            },
            departments: vec![
                department_share("Sales", 1_847_500, 65),
                department_share("Service", 687_200, 24),
                department_share("Parts", 312_800, 11),
            ],
            locations: vec![
                location("Premier Ford Lincoln", 847_500, 45, 92),
                location("Premier Honda", 654_200, 38, 88),
                location("Premier Toyota", 587_300, 34, 85),
                location("Premier Chevrolet", 758_500, 39, 90),
            ],
        })
    }

    #[instrument(skip(self))]
    async fn get_service_summary(&self) -> DashResult<ServiceSummary> {
        let today = self.calendar.today();

        let (repair_orders, appointments) = tokio::try_join!(
            self.dms
                .call(methods::PULL_REPAIR_ORDERS, Self::date_range(today, today)),
            self.dms
                .call(methods::PULL_APPOINTMENTS, Self::date_range(today, today)),
        )?;
        debug!(
            repair_orders = repair_orders.len(),
            appointments = appointments.len(),
            "Fetched service datasets"
        );

        Ok(ServiceSummary {
            active_ros: 47,
            todays_appointments: 23,
            avg_cycle_time: "2.4h".to_string(),
            technicians: TechnicianCount {
                active: 12,
                total: 14,
            },
            pending_checkin: 8,
            efficiency_trend: vec![85, 88, 92, 89, 91],
        })
    }

    #[instrument(skip(self))]
    async fn get_sales_summary(&self) -> DashResult<SalesSummary> {
        let today = self.calendar.today();

        let (deals, inventory) = tokio::try_join!(
            self.dms.call(
                methods::PULL_DEALS,
                Self::date_range(calendar::days_before(today, 30), today)
            ),
            self.dms.call(methods::PULL_INVENTORY, Parameters::new()),
        )?;
        debug!(
            deals = deals.len(),
            inventory = inventory.len(),
            "Fetched sales datasets"
        );

        Ok(SalesSummary {
            active_deals: 23,
            monthly_sales: 156,
            inventory_count: 342,
            avg_deal_value: 28_500,
            conversion_rate: 0.23,
            pipeline_value: 2_400_000,
        })
    }

    #[instrument(skip(self))]
    async fn get_parts_summary(&self) -> DashResult<PartsSummary> {
        let parts = self
            .dms
            .call(methods::PULL_PARTS_INVENTORY, Parameters::new())
            .await?;
        debug!(parts = parts.len(), "Fetched parts inventory");

        Ok(PartsSummary {
            total_parts: 15_420,
            low_stock_items: 23,
            pending_orders: 8,
            monthly_revenue: 312_800,
            top_movers: vec![
                part_mover("Oil Filter", 156, 2_340),
                part_mover("Brake Pads", 89, 4_560),
                part_mover("Air Filter", 134, 1_890),
            ],
        })
    }

    #[instrument(skip(self))]
    async fn get_customers(&self, limit: u32) -> DashResult<Vec<Customer>> {
        let records = self
            .dms
            .call(
                methods::PULL_CUSTOMERS,
                Parameters::new().with(methods::MAX_RECORDS, limit),
            )
            .await?;
        debug!(fields = records.len(), "Fetched customers");

        let today = self.calendar.today();
        Ok((1..=limit.min(MAX_CUSTOMERS))
            .map(|i| Customer {
                id: format!("CUST_{:04}", i),
                name: format!("Customer {}", i),
                email: format!("customer{}@example.com", i),
                phone: format!("555-{:04}", i),
                last_visit: calendar::format_date(calendar::days_before(today, i64::from(i))),
                total_spent: 1_500 + u64::from(i) * 100,
                vehicle_count: (i % 4).clamp(1, 3),
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_inventory(&self) -> DashResult<Vec<Vehicle>> {
        let records = self
            .dms
            .call(methods::PULL_INVENTORY, Parameters::new())
            .await?;
        debug!(fields = records.len(), "Fetched inventory");

        Ok((1..=INVENTORY_SIZE)
            .map(|i| Vehicle {
                vin: format!("1HGBH41JXMN{:06}", i),
                year: 2024,
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                trim: "LX".to_string(),
                price: 25_000 + u64::from(i) * 500,
                status: "Available".to_string(),
                days_in_stock: i % 90,
                location: "Premier Honda".to_string(),
            })
            .collect())
    }

    async fn test_connection(&self) -> ConnectionStatus {
        let (status, message) = match self
            .dms
            .call(methods::GET_DIVISIONS, Parameters::new())
            .await
        {
            Ok(_) => {
                info!("DMS connection test succeeded");
                (ConnectionState::Success, "Connection successful".to_string())
            }
            Err(e) => {
                warn!(error = %e, "DMS connection test failed");
                (ConnectionState::Error, e.to_string())
            }
        };

        ConnectionStatus {
            status,
            message,
            timestamp: Utc::now(),
        }
    }

    fn clear_cache(&self) -> CacheClearResult {
        CacheClearResult {
            cleared: self.dms.clear_cache(),
        }
    }

    fn get_alerts(&self) -> Vec<Alert> {
        insights::alerts(Utc::now())
    }

    fn get_kpis(&self, department: Option<Department>) -> KpiBoard {
        insights::kpis(department)
    }

    fn get_trends(&self, metric: TrendMetric, period: &str) -> Trend {
        insights::trend(metric, period)
    }
}

fn department_share(name: &str, revenue: u64, percentage: u32) -> DepartmentShare {
    DepartmentShare {
        name: name.to_string(),
        revenue,
        percentage,
    }
}

fn location(name: &str, revenue: u64, units: u32, efficiency: u32) -> LocationPerformance {
    LocationPerformance {
        name: name.to_string(),
        revenue,
        units,
        efficiency,
    }
}

fn part_mover(part: &str, quantity: u32, revenue: u64) -> PartMover {
    PartMover {
        part: part.to_string(),
        quantity,
        revenue,
    }
}
