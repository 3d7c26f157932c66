#[cfg(feature = "postgres")]
use deadpool_postgres::Pool as PostgresPool;

use crate::config::ExecutorOptions;
use crate::error::SqlRowMapError;
use crate::results::RowSet;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteHandle;
use crate::types::{DatabaseType, ParamValue};

/// Raw connection handle owned by a `QueryExecutor`.
///
/// One variant per compiled backend. Cloning shares the underlying connection or pool.
#[derive(Debug, Clone)]
pub enum DbHandle {
    /// `PostgreSQL` connection pool
    #[cfg(feature = "postgres")]
    Postgres(PostgresPool),
    /// `SQLite` connection
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteHandle),
}

impl DbHandle {
    /// Connect to `dsn` using the given backend.
    ///
    /// # Errors
    /// Returns `SqlRowMapError` if the DSN is invalid or the database cannot be reached.
    #[cfg_attr(not(feature = "postgres"), allow(unused_variables))]
    pub async fn open(
        db_type: DatabaseType,
        dsn: &str,
        options: &ExecutorOptions,
    ) -> Result<Self, SqlRowMapError> {
        match db_type {
            #[cfg(feature = "postgres")]
            DatabaseType::Postgres => {
                let pool = crate::postgres::config::open_pool(dsn, options.pool_max_size).await?;
                Ok(DbHandle::Postgres(pool))
            }
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Ok(DbHandle::Sqlite(SqliteHandle::open(dsn).await?)),
        }
    }

    #[must_use]
    pub fn database_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "postgres")]
            DbHandle::Postgres(_) => DatabaseType::Postgres,
            #[cfg(feature = "sqlite")]
            DbHandle::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    pub(crate) async fn select(
        &self,
        query: &str,
        params: &[ParamValue],
        null_text: &str,
    ) -> Result<RowSet, SqlRowMapError> {
        tracing::debug!(
            target: "sql_rowmap",
            backend = %self.database_type(),
            sql = query,
            params = params.len(),
            "select"
        );
        match self {
            #[cfg(feature = "postgres")]
            DbHandle::Postgres(pool) => {
                crate::postgres::execute_select(pool, query, params, null_text).await
            }
            #[cfg(feature = "sqlite")]
            DbHandle::Sqlite(conn) => conn.select(query, params, null_text).await,
        }
    }

    pub(crate) async fn execute(
        &self,
        query: &str,
        params: &[ParamValue],
    ) -> Result<usize, SqlRowMapError> {
        tracing::debug!(
            target: "sql_rowmap",
            backend = %self.database_type(),
            sql = query,
            params = params.len(),
            "execute"
        );
        match self {
            #[cfg(feature = "postgres")]
            DbHandle::Postgres(pool) => crate::postgres::execute_dml(pool, query, params).await,
            #[cfg(feature = "sqlite")]
            DbHandle::Sqlite(conn) => conn.execute(query, params).await,
        }
    }

    /// Close the connection or pool.
    ///
    /// # Errors
    /// Returns `SqlRowMapError` if the backend reports a failure while closing.
    pub async fn close(self) -> Result<(), SqlRowMapError> {
        match self {
            #[cfg(feature = "postgres")]
            DbHandle::Postgres(pool) => {
                pool.close();
                Ok(())
            }
            #[cfg(feature = "sqlite")]
            DbHandle::Sqlite(conn) => conn.close().await,
        }
    }
}
