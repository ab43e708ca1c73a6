//! # Store API
//!
//! REST server for order fulfillment.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Store API Server                              │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► routes ───► store-db services ───► SQLite│
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                                          BackorderNotifier              │
//! │                                           (log lines)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use store_api::config::ApiConfig;
use store_api::{build_router, AppState};
use store_db::{Database, DbConfig, LogNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Store API server...");

    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.database_path)
        .max_connections(config.db_max_connections)
        .run_migrations(config.db_run_migrations);
    let db = Database::new(db_config).await?;
    info!("Connected to SQLite");

    let state = AppState::new(db.clone(), Arc::new(LogNotifier));
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Store API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Store API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
