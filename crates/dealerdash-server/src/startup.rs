//! Server startup output.

use dealerdash_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
    ____             __          ____             __
   / __ \___  ____ _/ /__  _____/ __ \____ ______/ /_
  / / / / _ \/ __ `/ / _ \/ ___/ / / / __ `/ ___/ __ \
 / /_/ /  __/ /_/ / /  __/ /  / /_/ / /_/ (__  ) / / /
/_____/\___/\__,_/_/\___/_/  /_____/\__,_/____/_/ /_/
    "#
    );
}

/// Prints where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("Dashboard:   http://{}{}", addr, config.server.api_prefix);
    info!("Health:      http://{}/health", addr);
    if config.observability.metrics_enabled {
        info!("Metrics:     http://{}{}", addr, config.observability.metrics_path);
    }
    info!("DMS:         {}", config.dms.base_url);
    info!("{}", separator);
}
