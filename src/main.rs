// src/main.rs
use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use mall_directory::{app, config::Config, database, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env().context("invalid configuration")?;

    // Initialize logging
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Create database pool
    let db_pool = database::create_pool(&config.database)
        .await
        .context("failed to create database pool")?;

    if config.run_migrations {
        database::run_migrations(&db_pool)
            .await
            .context("failed to run migrations")?;
    }

    let app = app(AppState::new(db_pool));

    // Try port..port+20 so a busy port does not abort startup
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let addr = SocketAddr::from((config.host, config.port.saturating_add(offset)));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        let (listener, addr) = bound.with_context(|| {
            format!("failed to bind any port starting at {} on {}", config.port, config.host)
        })?;
        tracing::info!("Server running on {}", addr);
        listener
    };

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
