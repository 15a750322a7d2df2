//! # DealerDash Service
//!
//! Dashboard facade. Each operation pulls the upstream datasets it depends
//! on through the DMS client and shapes them into a dashboard view.

pub mod calendar;
pub mod dashboard_service;
pub mod dto;
pub mod insights;

mod r#impl;

pub use calendar::{Calendar, FixedCalendar, LocalCalendar};
pub use dashboard_service::*;
pub use dto::*;
pub use r#impl::DashboardServiceImpl;
