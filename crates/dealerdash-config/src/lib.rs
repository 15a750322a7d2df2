//! # DealerDash Config
//!
//! Configuration management for DealerDash.
//! Supports an environment-selected credential bundle layered with files
//! and environment variables.

mod app_config;
mod environment;
mod loader;
mod validation;

pub use app_config::*;
pub use environment::*;
pub use loader::*;
pub use validation::*;
