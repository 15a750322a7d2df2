//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator, Environment};
use config::{Config, ConfigError, File};
use dealerdash_core::DashError;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_VAR: &str = "DEALERDASH_ENVIRONMENT";

/// Prefix for configuration overrides, e.g. `DEALERDASH_DMS__USERNAME`.
pub const ENV_PREFIX: &str = "DEALERDASH";

/// Loads and validates the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader for the environment named by
    /// `DEALERDASH_ENVIRONMENT` (default: development).
    ///
    /// Configuration is layered in order:
    /// 1. The environment's built-in DMS credential bundle
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml`
    /// 4. `config/local.toml` (not committed to version control)
    /// 5. Environment variables with the `DEALERDASH_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, DashError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let label = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::for_environment(config_dir, Environment::from_label(&label))
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, DashError> {
        Self::new("./config")
    }

    /// Loads configuration for an explicit environment.
    pub fn for_environment(
        config_dir: impl Into<String>,
        environment: Environment,
    ) -> Result<Self, DashError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir, environment)?;

        Ok(Self { config, config_dir })
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub const fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the directory the configuration was read from.
    #[must_use]
    pub fn config_dir(&self) -> &str {
        &self.config_dir
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str, environment: Environment) -> Result<AppConfig, DashError> {
        info!("Loading configuration for environment: {}", environment);

        let preset = Config::try_from(&AppConfig::for_environment(environment))
            .map_err(config_error_to_dash_error)?;
        let mut builder = Config::builder().add_source(preset);

        let environment_name = environment.to_string();
        for name in ["default", environment_name.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .map_err(config_error_to_dash_error)?;

        // The selected environment wins over whatever a file claims.
        app_config.app.environment = environment;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| DashError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_dash_error(err: ConfigError) -> DashError {
    DashError::Configuration(err.to_string())
}
