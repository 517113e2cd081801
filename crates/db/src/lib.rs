//! Persistence layer for projecthub.
//!
//! - [`models`] -- entity structs and allow-listed input DTOs.
//! - [`gateway`] -- the store abstraction, its PostgreSQL and in-memory
//!   backends, and the request-scoped [`gateway::Session`] unit of work.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

pub mod gateway;
pub mod models;

use gateway::{MemoryStore, PgStore, Store};

pub type DbPool = sqlx::PgPool;

/// `DATABASE_URL` value that selects the in-memory store.
pub const MEMORY_URL: &str = "memory:";

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Open the store named by `database_url`.
///
/// [`MEMORY_URL`] yields a seeded [`MemoryStore`]; anything else is treated
/// as a PostgreSQL URL, connected, health-checked, and migrated.
pub async fn connect_store(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<dyn Store>, gateway::GatewayError> {
    if database_url == MEMORY_URL {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        return Ok(Arc::new(MemoryStore::seeded()));
    }

    let pool = create_pool(database_url, max_connections).await?;
    tracing::info!("Database connection pool created");

    health_check(&pool).await?;
    tracing::info!("Database health check passed");

    run_migrations(&pool)
        .await
        .map_err(|e| gateway::GatewayError::Database(e.into()))?;
    tracing::info!("Database migrations applied");

    Ok(Arc::new(PgStore::new(pool)))
}
