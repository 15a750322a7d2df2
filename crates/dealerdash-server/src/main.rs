//! # DealerDash Server
//!
//! Entry point for the DealerBuilt dashboard API.

use dealerdash_config::{AppConfig, ConfigLoader};
use dealerdash_core::{DashError, DashResult};
use dealerdash_server::{
    app::build_router,
    di::ServiceContainer,
    startup::{print_banner, print_startup_info},
    telemetry::{init_logging, install_metrics_recorder},
};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_inner(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();
    info!("Starting {} v{}", config.app.name, config.app.version);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> DashResult<()> {
    let metrics = if config.observability.metrics_enabled {
        Some(install_metrics_recorder()?)
    } else {
        None
    };

    let container = ServiceContainer::builder(config.dms.clone()).build()?;
    let router = build_router(&container, &config, metrics);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DashError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashError::internal(format!("REST server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
