//! Storage layer for the portfolio persistence layer.
//!
//! Provides database access via SQLx with SQLite.

mod models;
mod repository;

pub use repository::PortfolioRepository;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::StoreResult;

/// Build a connection pool from database configuration.
pub async fn connect_pool(config: &DatabaseConfig) -> StoreResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}
