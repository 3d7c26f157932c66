use tokio::task::spawn_blocking;

use crate::error::SqlRowMapError;

/// Turn a DSN into something `rusqlite::Connection::open` accepts.
///
/// Accepts plain paths, `:memory:`, `file:` URIs, and a `sqlite://` prefix.
pub(crate) fn normalize_dsn(dsn: &str) -> Result<String, SqlRowMapError> {
    let trimmed = dsn.trim();
    let path = trimmed.strip_prefix("sqlite://").unwrap_or(trimmed);
    if path.is_empty() {
        return Err(SqlRowMapError::ConfigError(
            "SQLite DSN must name a file, `:memory:`, or a `file:` URI".to_string(),
        ));
    }
    Ok(path.to_string())
}

/// Open a `SQLite` connection on a blocking thread.
///
/// # Errors
/// Returns `SqlRowMapError::ConfigError` for an empty DSN or
/// `SqlRowMapError::ConnectionError` if `SQLite` refuses to open the database.
pub async fn open_connection(dsn: &str) -> Result<rusqlite::Connection, SqlRowMapError> {
    let path = normalize_dsn(dsn)?;
    spawn_blocking(move || {
        rusqlite::Connection::open(&path).map_err(|e| {
            SqlRowMapError::ConnectionError(format!("Failed to open SQLite database {path}: {e}"))
        })
    })
    .await
    .map_err(|e| SqlRowMapError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_url_prefix() {
        assert_eq!(normalize_dsn("sqlite://data.db").unwrap(), "data.db");
        assert_eq!(normalize_dsn(" :memory: ").unwrap(), ":memory:");
        assert_eq!(
            normalize_dsn("file::memory:?cache=shared").unwrap(),
            "file::memory:?cache=shared"
        );
    }

    #[test]
    fn rejects_empty_dsn() {
        assert!(matches!(
            normalize_dsn("sqlite://"),
            Err(SqlRowMapError::ConfigError(_))
        ));
    }
}
