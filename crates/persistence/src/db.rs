//! PostgreSQL connection pool for the Surveil backend.
//!
//! The pool is built once at startup from the `[database]` section of the
//! Surveil config tree (every field overridable via `SURVEIL__DATABASE__*`
//! env vars) and shared across repositories through cheap `PgPool` clones.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Pool settings, converted from the api crate's `[database]` config section.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Open the shared connection pool. Fails fast if PostgreSQL is unreachable
/// within the connect timeout, so a misconfigured deployment dies at boot
/// instead of on the first camera heartbeat.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}
