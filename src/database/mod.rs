pub mod models;
pub mod postgres;
pub mod repository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::repository::RepositoryError;

/// Build the connection pool from explicit configuration. The pool is the
/// only process-wide database handle and is threaded into handlers through
/// application state, never reached through a global.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, RepositoryError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await?;

    info!("created database pool (max_connections={})", config.max_connections);
    Ok(pool)
}
