//! Component wiring.
//!
//! The server builds exactly one DMS client at startup and hands the same
//! instance to the dashboard service, so every request shares one cache and
//! one connection pool.

use dealerdash_client::{Clock, DmsApi, DmsClient, HttpTransport, SystemClock, Transport};
use dealerdash_config::DmsConfig;
use dealerdash_core::DashResult;
use dealerdash_service::{Calendar, DashboardService, DashboardServiceImpl, LocalCalendar};
use std::sync::Arc;
use tracing::info;

/// Constructed application components.
#[derive(Clone)]
pub struct ServiceContainer {
    dms_client: DmsClient,
    dashboard_service: Arc<dyn DashboardService>,
}

impl ServiceContainer {
    /// Starts building a container for the given DMS settings.
    #[must_use]
    pub fn builder(config: DmsConfig) -> ServiceContainerBuilder {
        ServiceContainerBuilder::new(config)
    }

    #[must_use]
    pub fn dms_client(&self) -> &DmsClient {
        &self.dms_client
    }

    #[must_use]
    pub fn dashboard_service(&self) -> Arc<dyn DashboardService> {
        Arc::clone(&self.dashboard_service)
    }
}

/// Builder for [`ServiceContainer`]. Parts not supplied get their
/// production defaults.
pub struct ServiceContainerBuilder {
    config: DmsConfig,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
    calendar: Option<Arc<dyn Calendar>>,
}

impl ServiceContainerBuilder {
    #[must_use]
    pub fn new(config: DmsConfig) -> Self {
        Self {
            config,
            transport: None,
            clock: None,
            calendar: None,
        }
    }

    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn build(self) -> DashResult<ServiceContainer> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let calendar = self.calendar.unwrap_or_else(|| Arc::new(LocalCalendar));

        info!(
            endpoint = %self.config.base_url,
            cache_ttl_secs = self.config.cache_ttl_secs,
            request_timeout_secs = self.config.request_timeout_secs,
            "Creating DMS client"
        );
        let dms_client = DmsClient::with_parts(self.config, transport, clock);

        let dms: Arc<dyn DmsApi> = Arc::new(dms_client.clone());
        let dashboard_service: Arc<dyn DashboardService> =
            Arc::new(DashboardServiceImpl::with_calendar(dms, calendar));

        Ok(ServiceContainer {
            dms_client,
            dashboard_service,
        })
    }
}
