use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;
#[cfg(feature = "postgres")]
use tokio_postgres;

#[derive(Debug, Error)]
pub enum SqlRowMapError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PoolErrorPostgres(#[from] deadpool_postgres::PoolError),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Connection is closed")]
    ConnectionClosed,

    #[error("no sql statement")]
    EmptyStatement,

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("Cannot render column `{column}` as text: {message}")]
    ScanError { column: String, message: String },

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl SqlRowMapError {
    pub(crate) fn scan(column: &str, message: impl Into<String>) -> Self {
        SqlRowMapError::ScanError {
            column: column.to_string(),
            message: message.into(),
        }
    }
}
