//! # DealerDash Server Library
//!
//! Wiring for the dashboard API server: component construction, router
//! assembly, logging setup and startup output.

pub mod app;
pub mod di;
pub mod startup;
pub mod telemetry;
