//! HTTP transport for SOAP requests.

use crate::normalizer;
use async_trait::async_trait;
use dealerdash_config::DmsConfig;
use dealerdash_core::{DashError, DashResult};
use reqwest::header::CONTENT_TYPE;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// A ready-to-send SOAP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    /// Quoted `SOAPAction` header value.
    pub action: String,
    /// Serialized envelope.
    pub body: String,
}

/// Sends a SOAP request and returns the raw reply body.
///
/// Implementations classify failures into the transport error family:
/// `Timeout`, `Connection`, `UpstreamStatus` or `UpstreamFault`.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn send(&self, request: SoapRequest) -> DashResult<String>;
}

/// Runs a future with a hard time bound.
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> DashResult<T>
where
    F: Future<Output = DashResult<T>>,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| DashError::Timeout(format!("no reply after {:?}", duration)))?
}

/// reqwest-backed transport. The underlying connection pool is shared by
/// every call made through one instance.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport for the configured endpoint and timeout.
    pub fn new(config: &DmsConfig) -> DashResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| DashError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Creates a transport from an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: SoapRequest) -> DashResult<String> {
        debug!(endpoint = %self.endpoint, action = %request.action, "Sending SOAP request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", request.action)
            .body(request.body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if status.is_success() {
            return Ok(body);
        }

        warn!(status = status.as_u16(), "DMS returned non-success status");
        Err(match normalizer::fault(&body) {
            Some(fault) => fault.into(),
            None => DashError::UpstreamStatus {
                status: status.as_u16(),
                message: truncate(&body),
            },
        })
    }
}

fn classify(err: reqwest::Error) -> DashError {
    if err.is_timeout() {
        DashError::Timeout(err.to_string())
    } else if err.is_connect() || err.is_request() {
        DashError::Connection(err.to_string())
    } else {
        DashError::internal(format!("HTTP error: {}", err))
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
