//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for DealerDash.
///
/// Transport failures are split by kind so callers can tell a retryable
/// timeout apart from an upstream rejection. A cache miss is not an error
/// and never appears here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashError {
    // ============ Transport Errors ============
    /// The upstream call did not complete within its time bound.
    #[error("Upstream request timed out: {0}")]
    Timeout(String),

    /// The upstream endpoint could not be reached.
    #[error("Upstream connection failed: {0}")]
    Connection(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// The upstream answered with a SOAP fault.
    #[error("Upstream fault {code}: {message}")]
    UpstreamFault { code: String, message: String },

    // ============ Payload Errors ============
    /// The upstream reply could not be parsed.
    #[error("Failed to parse upstream response: {0}")]
    Normalization(String),

    /// Invalid request input (method names, parameter keys, query values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// No route matches the request path.
    #[error("{0} not found")]
    NotFound(String),

    /// The route exists but not for this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed => 405,
            Self::Timeout(_) => 504,
            Self::Connection(_)
            | Self::UpstreamStatus { .. }
            | Self::UpstreamFault { .. }
            | Self::Normalization(_) => 502,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "UPSTREAM_TIMEOUT",
            Self::Connection(_) => "UPSTREAM_UNREACHABLE",
            Self::UpstreamStatus { .. } => "UPSTREAM_STATUS",
            Self::UpstreamFault { .. } => "UPSTREAM_FAULT",
            Self::Normalization(_) => "MALFORMED_RESPONSE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error; the message reads `<what> not found`.
    #[must_use]
    pub fn not_found<T: Into<String>>(what: T) -> Self {
        Self::NotFound(what.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a normalization error.
    #[must_use]
    pub fn normalization<T: Into<String>>(message: T) -> Self {
        Self::Normalization(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    ///
    /// Timeouts, unreachable hosts and 5xx replies may succeed on a later
    /// attempt; 4xx replies and faults will not.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::UpstreamStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `DashError`.
    #[must_use]
    pub fn from_error(error: &DashError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&DashError> for ErrorResponse {
    fn from(error: &DashError) -> Self {
        Self::from_error(error)
    }
}
