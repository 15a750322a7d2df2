//! Data Transfer Objects for the dashboard views.

mod insight_dto;
mod record_dto;
mod summary_dto;

pub use insight_dto::*;
pub use record_dto::*;
pub use summary_dto::*;
