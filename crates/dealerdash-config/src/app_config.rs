//! Application configuration structures.

use crate::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream DMS configuration.
    #[serde(default)]
    pub dms: DmsConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Builds the default configuration for an environment, using that
    /// environment's DMS credential bundle.
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            app: AppMetadata {
                environment,
                ..AppMetadata::default()
            },
            dms: environment.dms_preset(),
            ..Self::default()
        }
    }
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Deployment environment.
    pub environment: Environment,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "DealerBuilt Dashboard API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// REST server host.
    pub host: String,
    /// REST server port.
    pub port: u16,
    /// Prefix under which the dashboard routes are mounted.
    pub api_prefix: String,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            api_prefix: "/api/dashboard".to_string(),
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the REST server address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream DMS (DealerBuilt CDX) configuration.
///
/// Immutable for the lifetime of a client built from it.
#[derive(Clone, Serialize, Deserialize)]
pub struct DmsConfig {
    /// SOAP endpoint URL.
    pub base_url: String,
    /// API user name, sent in the SOAP authentication header.
    pub username: String,
    /// API password, sent in the SOAP authentication header.
    pub password: String,
    /// Source identifier.
    pub source_id: String,
    /// Company identifier.
    pub company_id: String,
    /// Store identifier.
    pub store_id: String,
    /// Service location identifier.
    pub service_location_id: String,
    /// How long a fetched response stays valid in the cache.
    pub cache_ttl_secs: u64,
    /// Hard bound on a single upstream call.
    pub request_timeout_secs: u64,
}

impl Default for DmsConfig {
    fn default() -> Self {
        Environment::Development.dms_preset()
    }
}

impl DmsConfig {
    /// Returns the cache TTL as a Duration.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns true when both credentials are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DmsConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("source_id", &self.source_id)
            .field("company_id", &self.company_id)
            .field("store_id", &self.store_id)
            .field("service_location_id", &self.service_location_id)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,
    /// Metrics endpoint path.
    pub metrics_path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: true,
            metrics_path: "/metrics".to_string(),
        }
    }
}
