//! Configuration validation.
//!
//! Collects every problem in one pass so a misconfigured deployment fails at
//! startup with the full list instead of on the first upstream call.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// A required setting is empty.
    MissingValue { name: String },
    /// Timeout or TTL must be positive.
    NonPositiveDuration { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
    /// Route prefix must start with '/'.
    InvalidPrefix { name: String, value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::MissingValue { name } => {
                write!(f, "Missing required setting '{}'", name)
            }
            Self::NonPositiveDuration { name } => {
                write!(f, "'{}' must be positive", name)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format: '{}' (valid: pretty, json)", value)
            }
            Self::InvalidPrefix { name, value } => {
                write!(f, "'{}' must start with '/', got '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    fn require(&mut self, name: &str, value: &str) {
        if value.trim().is_empty() {
            self.add_error(ConfigValidationError::MissingValue {
                name: name.to_string(),
            });
        }
    }

    fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["pretty", "json"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::default();

        Self::validate_server(&config.server, &mut result);
        Self::validate_dms(&config.dms, &mut result);
        Self::validate_observability(&config.observability, &mut result);

        result.into_result()
    }

    fn validate_server(config: &crate::ServerConfig, result: &mut ValidationResult) {
        if config.port == 0 {
            result.add_error(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }

        if !config.api_prefix.starts_with('/') {
            result.add_error(ConfigValidationError::InvalidPrefix {
                name: "server.api_prefix".to_string(),
                value: config.api_prefix.clone(),
            });
        }
    }

    /// Validates the DMS settings. Every field is checked regardless of
    /// environment; production bundles start blank, so an unconfigured
    /// production deployment is caught here.
    fn validate_dms(config: &crate::DmsConfig, result: &mut ValidationResult) {
        match Url::parse(&config.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "dms.base_url".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "dms.base_url".to_string(),
                message: e.to_string(),
            }),
        }

        result.require("dms.username", &config.username);
        result.require("dms.password", &config.password);
        result.require("dms.source_id", &config.source_id);
        result.require("dms.company_id", &config.company_id);
        result.require("dms.store_id", &config.store_id);
        result.require("dms.service_location_id", &config.service_location_id);

        if config.cache_ttl_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveDuration {
                name: "dms.cache_ttl_secs".to_string(),
            });
        }
        if config.request_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveDuration {
                name: "dms.request_timeout_secs".to_string(),
            });
        }
    }

    fn validate_observability(config: &crate::ObservabilityConfig, result: &mut ValidationResult) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }

        if config.metrics_enabled && !config.metrics_path.starts_with('/') {
            result.add_error(ConfigValidationError::InvalidPrefix {
                name: "observability.metrics_path".to_string(),
                value: config.metrics_path.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
