//! Ferien HTTP Server Binary
//!
//! Main entry point for the school-free day service. It loads the
//! configuration, builds one refresh controller per configured state, runs an
//! initial refresh, schedules periodic refreshes and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! # Configuration from ./ferien.toml
//! cargo run --bin ferien-server
//!
//! # Explicit configuration file
//! FERIEN_CONFIG=/etc/ferien.toml cargo run --bin ferien-server
//! ```
//!
//! # Environment Variables
//!
//! - `FERIEN_CONFIG`: Path to the TOML configuration (default: ferien.toml)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ferien_rust::clock::{Clock, SystemClock};
use ferien_rust::config::AppConfig;
use ferien_rust::http::{create_router, AppState};
use ferien_rust::persistence::YamlFileSink;
use ferien_rust::services::{spawn_periodic_refresh, FerienRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Ferien HTTP Server");

    let config = AppConfig::from_default_location()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let registry = Arc::new(FerienRegistry::from_config(
        &config,
        Arc::new(YamlFileSink::new()),
        clock.clone(),
    )?);
    info!(
        "Configured states: {}",
        registry
            .states()
            .iter()
            .map(|s| s.code())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Startup refresh; a state without data keeps serving 503 until a later
    // scheduled refresh succeeds.
    for (state, result) in registry.refresh_all().await {
        if let Err(e) = result {
            warn!("Initial refresh for {} failed: {}", state, e);
        }
    }

    let period = Duration::from_secs(config.schedule.scan_interval_secs);
    let _tasks: Vec<_> = registry
        .controllers()
        .map(|controller| spawn_periodic_refresh(controller.clone(), period))
        .collect();

    // Create application state and router
    let state = AppState::new(registry, clock);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
