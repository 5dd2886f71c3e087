//! Hardened HTTP API (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                  HARDENED API                     │
//!                        │                                                   │
//!     Client Request     │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!     ───────────────────┼─▶│middleware│──▶│dispatcher│──▶│ api handler  │  │
//!                        │  │ id/trace │   │ (router) │   │ validate     │  │
//!                        │  └──────────┘   └──────────┘   └──────┬───────┘  │
//!                        │                                       │          │
//!                        │        ┌──────────┬──────────┬────────┴───┐      │
//!                        │        ▼          ▼          ▼            ▼      │
//!                        │   ┌────────┐ ┌────────┐ ┌─────────┐ ┌─────────┐  │
//!                        │   │  auth  │ │compute │ │ argon2  │ │ sandbox │  │
//!                        │   │ +store │ │ parser │ │ hashing │ │  files  │  │
//!                        │   └────────┘ └────────┘ └─────────┘ └─────────┘  │
//!                        │                                                   │
//!     Client Response    │  ┌──────────────────────────────────────────┐    │
//!     ◀──────────────────┼──│ envelope: {status, ...} / fixed errors   │    │
//!                        │  └──────────────────────────────────────────┘    │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use hardened_api::auth::SqliteCredentialStore;
use hardened_api::config::load_startup_config;
use hardened_api::lifecycle::signals::spawn_signal_listener;
use hardened_api::observability::{logging, metrics};
use hardened_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "hardened-api")]
#[command(about = "Hardened HTTP API server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "API_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_startup_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("hardened-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );
    if config.secret_key.is_placeholder() {
        tracing::warn!("SECRET_KEY is not set; using the placeholder key");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = SqliteCredentialStore::connect(&config.storage).await?;
    let server = HttpServer::new(config.clone(), Arc::new(store.clone()))?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());
    server.run(listener, shutdown.subscribe()).await?;

    store.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
