//! API response types.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use dealerdash_core::{DashError, ErrorResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Standard API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable error code, on failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiEnvelope<T> {
    /// Creates a successful envelope.
    pub fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            count: None,
            message: None,
            code: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiEnvelope<()> {
    /// Creates an error envelope.
    pub fn error(error: ErrorResponse) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
            count: None,
            message: Some(error.message),
            code: Some(error.code),
            timestamp: Utc::now(),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub DashError);

impl From<DashError> for AppError {
    fn from(err: DashError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        } else {
            warn!(code = self.0.error_code(), error = %self.0, "Request rejected");
        }

        let body = Json(ApiEnvelope::error(ErrorResponse::from(&self.0)));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiEnvelope<T>>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiEnvelope::success(data)))
}

/// Helper to create a success response for a list, with its length.
pub fn ok_list<T: Serialize>(items: Vec<T>) -> ApiResult<Vec<T>> {
    let count = items.len();
    Ok(Json(ApiEnvelope::success(items).with_count(count)))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> AppError {
    debug!(path = %uri.path(), "No route matched");
    AppError(DashError::not_found("Endpoint"))
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError(DashError::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(ApiEnvelope::success(vec![1, 2]).with_count(2)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["count"], 2);
        assert!(json.get("message").is_none());
        assert!(json.get("code").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_envelope_shape() {
        let error = ErrorResponse::from(&DashError::internal("boom"));
        let json = serde_json::to_value(ApiEnvelope::error(error)).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Internal error: boom");
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_app_error_status() {
        let response = AppError(DashError::Timeout("30s".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let response = AppError(DashError::validation("limit")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError(DashError::MethodNotAllowed).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
