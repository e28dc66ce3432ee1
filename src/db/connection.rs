use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use super::schema;
use crate::config::DatabaseConfig;

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the pool and creates the tables. Every pooled connection enforces
/// foreign keys and waits on a locked database instead of failing at once.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false)
        .map_sqlx_sqlite_opts(|opts| opts.foreign_keys(true).busy_timeout(SQLITE_BUSY_TIMEOUT));

    let db = Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.url))?;
    info!(url = %cfg.url, "connected to database");

    schema::bootstrap(&db)
        .await
        .context("failed to create database schema")?;
    Ok(db)
}
