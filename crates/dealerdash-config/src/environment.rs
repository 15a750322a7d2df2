//! Environment selection and per-environment DMS credential bundles.

use crate::DmsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default DealerBuilt CDX endpoint.
pub const DEFAULT_DMS_URL: &str = "https://cdx.dealerbuilt.com/CDXWebService.asmx";

/// Deployment environment. Selects the DMS credential bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Demo credentials baked in, short cache TTL.
    #[default]
    Development,
    /// Credentials come from the deployment environment.
    Production,
}

impl Environment {
    /// Resolves an environment label. Unknown labels fall back to development.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Returns true for production deployments.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Returns the DMS credential bundle for this environment.
    ///
    /// Production identifiers are left blank; they must be supplied through
    /// `DEALERDASH_DMS__*` variables or a config file.
    #[must_use]
    pub fn dms_preset(&self) -> DmsConfig {
        match self {
            Self::Development => DmsConfig {
                base_url: DEFAULT_DMS_URL.to_string(),
                username: "demo_user".to_string(),
                password: "demo_password".to_string(),
                source_id: "DEMO_SOURCE".to_string(),
                company_id: "DEMO_COMPANY".to_string(),
                store_id: "DEMO_STORE".to_string(),
                service_location_id: "DEMO_SERVICE_LOC".to_string(),
                cache_ttl_secs: 300,
                request_timeout_secs: 30,
            },
            Self::Production => DmsConfig {
                base_url: DEFAULT_DMS_URL.to_string(),
                username: String::new(),
                password: String::new(),
                source_id: String::new(),
                company_id: String::new(),
                store_id: String::new(),
                service_location_id: String::new(),
                cache_ttl_secs: 600,
                request_timeout_secs: 30,
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Environment::from_label("production"), Environment::Production);
        assert_eq!(Environment::from_label(" PROD "), Environment::Production);
        assert_eq!(Environment::from_label("development"), Environment::Development);
        assert_eq!(Environment::from_label("staging"), Environment::Development);
    }

    #[test]
    fn test_presets() {
        let dev = Environment::Development.dms_preset();
        assert_eq!(dev.username, "demo_user");
        assert_eq!(dev.cache_ttl_secs, 300);

        let prod = Environment::Production.dms_preset();
        assert!(prod.username.is_empty());
        assert!(prod.password.is_empty());
        assert_eq!(prod.cache_ttl_secs, 600);
        assert_eq!(prod.base_url, DEFAULT_DMS_URL);
    }

    #[test]
    fn test_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::default().to_string(), "development");
    }
}
