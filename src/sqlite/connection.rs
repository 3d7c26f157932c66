use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::spawn_blocking;

use crate::error::SqlRowMapError;
use crate::results::RowSet;
use crate::types::ParamValue;

use super::config::open_connection;
use super::params::Params;
use super::query::build_row_set;

pub type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// A single `SQLite` connection shared behind an async mutex.
///
/// Work runs on tokio's blocking pool; each call holds the lock for its whole round-trip.
#[derive(Clone)]
pub struct SqliteHandle {
    conn: SharedSqliteConnection,
    dsn: Arc<str>,
}

impl SqliteHandle {
    /// Open the database named by `dsn`.
    ///
    /// # Errors
    /// Returns `SqlRowMapError` if the DSN is invalid or the database cannot be opened.
    pub async fn open(dsn: &str) -> Result<Self, SqlRowMapError> {
        let conn = open_connection(dsn).await?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            dsn: Arc::from(dsn),
        })
    }

    #[must_use]
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// Execute a query and materialize every row as text.
    ///
    /// # Errors
    /// Returns `SqlRowMapError` if preparing, executing, or rendering fails.
    pub async fn select(
        &self,
        query: &str,
        params: &[ParamValue],
        null_text: &str,
    ) -> Result<RowSet, SqlRowMapError> {
        let sql_owned = query.to_owned();
        let params_owned = Params::convert(params);
        let null_owned = null_text.to_owned();
        run_blocking(Arc::clone(&self.conn), move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            build_row_set(&mut stmt, &params_owned, &null_owned)
        })
        .await
    }

    /// Execute a DML statement and return rows affected.
    ///
    /// # Errors
    /// Returns `SqlRowMapError` if preparing or executing fails.
    pub async fn execute(
        &self,
        query: &str,
        params: &[ParamValue],
    ) -> Result<usize, SqlRowMapError> {
        let sql_owned = query.to_owned();
        let params_owned = Params::convert(params);
        run_blocking(Arc::clone(&self.conn), move |guard| {
            let mut stmt = guard.prepare(&sql_owned)?;
            let refs = params_owned.as_refs();
            Ok(stmt.execute(&refs[..])?)
        })
        .await
    }

    /// Run synchronous `rusqlite` logic against the underlying connection.
    ///
    /// # Errors
    /// Propagates any `SqlRowMapError` raised by the callback or the blocking task.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, SqlRowMapError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlRowMapError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }

    /// Close the connection.
    ///
    /// If clones of this handle are still alive the connection stays open until the last one is
    /// dropped, and an error says so.
    ///
    /// # Errors
    /// Returns `SqlRowMapError` if `SQLite` reports a failure while closing, or
    /// `SqlRowMapError::ConnectionError` if the handle is still shared.
    pub async fn close(self) -> Result<(), SqlRowMapError> {
        let Ok(mutex) = Arc::try_unwrap(self.conn) else {
            return Err(SqlRowMapError::ConnectionError(format!(
                "SQLite connection {} is still referenced elsewhere",
                self.dsn
            )));
        };
        let conn = mutex.into_inner();
        spawn_blocking(move || conn.close().map_err(|(_, e)| SqlRowMapError::SqliteError(e)))
            .await
            .map_err(|e| {
                SqlRowMapError::ExecutionError(format!("sqlite spawn_blocking join error: {e}"))
            })?
    }
}

impl fmt::Debug for SqliteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteHandle")
            .field("dsn", &self.dsn)
            .finish_non_exhaustive()
    }
}

async fn run_blocking<F, R>(conn: SharedSqliteConnection, func: F) -> Result<R, SqlRowMapError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlRowMapError> + Send + 'static,
    R: Send + 'static,
{
    spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| SqlRowMapError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}
