//! Query string extractor with enveloped rejections.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use dealerdash_core::DashError;
use serde::de::DeserializeOwned;

/// Like [`Query`], but a query string that does not deserialize becomes a
/// 400 validation error in the standard error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(DashError::validation(rejection.body_text())))?;
        Ok(Self(value))
    }
}
