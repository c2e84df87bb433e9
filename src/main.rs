use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use song_library::{AppState, config::Config, db::Database, routers::build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => info!("No .env file found, using process environment"),
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        mode = ?config.mode,
        server_address = %config.server_address,
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let database = Database::connect(&config.database_url, config.max_connections)
        .await
        .context("failed to connect to database")?;
    info!("📊 Connected to PostgreSQL database");

    database
        .migrate()
        .await
        .context("failed to run database migrations")?;
    info!("📊 Database migrations completed");

    let listener = tokio::net::TcpListener::bind(&config.server_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server_address))?;

    let app = build_router(AppState::new(Arc::new(database)));

    info!("🎵 Song library listening on {}", config.server_address);
    info!("🎵 Song API endpoints: /songs, /song/{{id}}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
