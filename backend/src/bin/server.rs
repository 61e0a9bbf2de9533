//! Insight dashboard HTTP server binary.
//!
//! Loads the dashboard configuration, builds the rendering engine and an
//! in-memory analysis store, and serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin insight-server
//!
//! # With a custom industry configuration
//! DASHBOARD_CONFIG=./dashboard.toml cargo run --bin insight-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DASHBOARD_CONFIG`: Path to a dashboard TOML file (default: search, then built-ins)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use insight_dash::config::DashboardConfig;
use insight_dash::db::{AnalysisRepository, LocalRepository};
use insight_dash::http::{create_router, AppState};
use insight_dash::services::DashboardEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the library are bridged in.
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting insight dashboard server");

    let config = DashboardConfig::load()?;
    let industries: Vec<&str> = config.industry_keys().collect();
    info!("Loaded dashboard profiles: {}", industries.join(", "));

    let engine = Arc::new(DashboardEngine::new(Arc::new(config))?);
    let repository: Arc<dyn AnalysisRepository> = Arc::new(LocalRepository::new());
    info!("Analysis store initialized (in-memory)");

    let app = create_router(AppState::new(repository, engine));

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
