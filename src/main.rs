//! SchoolHub status dashboard.
//!
//! Loads every module's stats, re-loads them on the configured interval,
//! and prints the headline figures whenever a fresh snapshot lands. Runs
//! until Ctrl+C or SIGTERM.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use schoolhub_client::HttpApi;
use schoolhub_core::config::AppConfig;
use schoolhub_core::error::AppError;
use schoolhub_view::TracingNotifier;
use schoolhub_worker::{DashboardApis, RefreshScheduler, StatusDashboard};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Dashboard error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("SCHOOLHUB_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("SCHOOLHUB_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Starting SchoolHub dashboard v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api.base_url
    );

    let api = Arc::new(HttpApi::new(&config.api)?);
    let dashboard = Arc::new(StatusDashboard::new(
        DashboardApis::shared(api),
        Arc::new(TracingNotifier),
    ));

    let mut updates = dashboard.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let Some(snapshot) = updates.borrow_and_update().clone() else {
                continue;
            };
            println!(
                "\nSchoolHub overview ({})",
                snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            for (module, headline) in snapshot.headlines() {
                println!("  {:<12} {}", module, headline);
            }
        }
    });

    let handle = RefreshScheduler::every_seconds(config.console.refresh_interval_seconds)
        .spawn(dashboard.clone());

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping refresh...");

    handle.shutdown().await?;
    drop(dashboard);
    let _ = printer.await;

    tracing::info!("SchoolHub dashboard stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
