//! Result type aliases for DealerDash.

use crate::DashError;

/// A specialized `Result` type for DealerDash operations.
pub type DashResult<T> = Result<T, DashError>;
