//! Cerber server: token broker entry point.
//!
//! Loads configuration, starts the configured zone providers, and serves the
//! HTTP API until Ctrl-C.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cerber_api::{AppState, build_router};
use cerber_auth::TokenEngine;
use cerber_core::config::AppConfig;
use cerber_core::error::{CerberError, ErrorKind};
use cerber_zone::{ZoneRegistry, create_provider};

/// Cerber token broker.
#[derive(Debug, Parser)]
#[command(name = "cerber-server", version, about)]
struct Args {
    /// Base configuration file; the extension may be omitted.
    #[arg(short, long, default_value = "config/default")]
    config: String,

    /// Environment overlay loaded from `config/<env>`.
    #[arg(short, long, default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match AppConfig::load(&args.config, &args.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
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

/// Builds the registry from configured provider URIs. A provider that
/// cannot be constructed is logged and left out.
fn build_registry(config: &AppConfig) -> ZoneRegistry {
    let mut registry = ZoneRegistry::new();
    for location in &config.providers {
        match create_provider(location) {
            Ok(provider) => {
                registry.add_provider(provider);
            }
            Err(e) => {
                tracing::error!(provider = %location, error = %e, "Failed to create zone provider");
            }
        }
    }
    registry
}

async fn run(config: AppConfig) -> Result<(), CerberError> {
    tracing::info!("Starting Cerber v{}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(build_registry(&config));
    let online = registry.start_all().await;
    if online == 0 {
        return Err(CerberError::configuration(format!(
            "No zone provider is online ({} configured)",
            config.providers.len()
        )));
    }
    tracing::info!(online, total = registry.len(), "Zone providers started");

    let engine = TokenEngine::new(config.realm.clone(), Arc::clone(&registry));
    let router = build_router(AppState::new(engine));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await.map_err(|e| {
        CerberError::with_source(ErrorKind::Io, format!("Failed to bind {addr}"), e)
    })?;
    tracing::info!(address = %addr, realm = %config.realm, "Listening");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    tracing::info!("Stopping zone providers");
    registry.stop_all().await;

    served.map_err(CerberError::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
