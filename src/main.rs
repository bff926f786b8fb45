use std::sync::Arc;

use anyhow::Context;
use canteen_api_rust::config::AppConfig;
use canteen_api_rust::database::{self, postgres::PgRepository};
use canteen_api_rust::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    tracing::info!("starting canteen API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .context("failed to create database pool")?;

    let state = AppState::new(Arc::new(PgRepository::new(pool)));
    let app = canteen_api_rust::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("canteen API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server")?;

    Ok(())
}
