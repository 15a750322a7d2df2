//! # DealerDash REST
//!
//! JSON REST surface for the dashboard. Every response, success or failure,
//! uses the same `{status, data|message, timestamp}` envelope.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
