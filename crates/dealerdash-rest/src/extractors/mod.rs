//! Custom Axum extractors.

mod query;

pub use query::*;
