use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates the PostgreSQL pool.
///
/// The pool connects lazily so the API still starts when the database is down;
/// handlers then answer `DATABASE_UNAVAILABLE` until it comes back.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
        .context("DATABASE_URL is not a valid PostgreSQL connection string")?;

    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => info!("PostgreSQL connection pool established"),
        Err(e) => warn!("PostgreSQL not reachable at startup: {e}"),
    }

    Ok(pool)
}
