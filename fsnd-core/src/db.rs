//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Each request borrows a
//! connection (or opens a transaction) and hands it back before returning.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::ServiceSettings;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool with the default limit.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to database");
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await
}

/// Create a pool from resolved service settings.
pub async fn pool_for(settings: &ServiceSettings) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(&settings.database_url, settings.max_connections).await
}
