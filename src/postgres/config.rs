use std::str::FromStr;

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

use crate::error::SqlRowMapError;

/// Build a Postgres pool from a DSN without connecting.
///
/// Accepts anything `tokio_postgres::Config` parses: `postgres://` URLs or `key=value` strings.
///
/// # Errors
/// Returns `SqlRowMapError::ConfigError` if the DSN does not parse or names no host, and
/// `SqlRowMapError::ConnectionError` if the pool cannot be built.
pub fn build_pool(dsn: &str, max_size: usize) -> Result<Pool, SqlRowMapError> {
    let pg_config = tokio_postgres::Config::from_str(dsn)
        .map_err(|e| SqlRowMapError::ConfigError(format!("Invalid Postgres DSN: {e}")))?;

    if pg_config.get_hosts().is_empty() {
        return Err(SqlRowMapError::ConfigError("host is required".to_string()));
    }

    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );

    Pool::builder(manager)
        .max_size(max_size.max(1))
        .build()
        .map_err(|e| {
            SqlRowMapError::ConnectionError(format!("Failed to create Postgres pool: {e}"))
        })
}

/// Build a pool and check that a connection can actually be made.
///
/// # Errors
/// Returns `SqlRowMapError` if the DSN is invalid or the server cannot be reached.
pub async fn open_pool(dsn: &str, max_size: usize) -> Result<Pool, SqlRowMapError> {
    let pool = build_pool(dsn, max_size)?;
    {
        let client = pool.get().await?;
        client.simple_query("SELECT 1").await?;
    }
    Ok(pool)
}
