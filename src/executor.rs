use std::sync::Arc;

use crate::config::ExecutorOptions;
use crate::connection::DbHandle;
use crate::error::SqlRowMapError;
use crate::logging::{QueryLogger, TracingLogger};
use crate::results::{RowSet, StringRow};
use crate::statement::Statement;
use crate::types::{DatabaseType, ParamValue};

/// Owns a connection and a `Statement`, and runs the statement as text rows.
///
/// ```rust,no_run
/// use sql_rowmap::prelude::*;
///
/// # async fn demo() -> Result<(), SqlRowMapError> {
/// let mut exec = QueryExecutor::open("sqlite", ":memory:").await?;
/// exec.fill("SELECT id, name FROM users", &[])
///     .fill(" WHERE id = ?", &[ParamValue::Int(3)]);
///
/// let row = exec.query().await?;
/// if row.is_empty() {
///     println!("no such user");
/// } else {
///     println!("{}", row.get("name").unwrap_or_default());
/// }
/// exec.close().await?;
/// # Ok(())
/// # }
/// ```
///
/// Every failure is reported twice: once through the injected `QueryLogger`, and once as the
/// returned `Err`.
pub struct QueryExecutor {
    handle: Option<DbHandle>,
    db_type: DatabaseType,
    statement: Statement,
    options: ExecutorOptions,
    logger: Arc<dyn QueryLogger>,
}

impl QueryExecutor {
    /// Open a connection with default options, logging through `tracing`.
    ///
    /// # Errors
    /// Returns `SqlRowMapError::UnsupportedDriver` for an unknown driver identifier, or the
    /// backend's error if the connection cannot be made.
    pub async fn open(driver: &str, dsn: &str) -> Result<Self, SqlRowMapError> {
        Self::open_with(driver, dsn, ExecutorOptions::default(), Arc::new(TracingLogger)).await
    }

    /// Open a connection with explicit options and logger.
    ///
    /// # Errors
    /// Same as [`QueryExecutor::open`]; the error is also sent to `logger`.
    pub async fn open_with(
        driver: &str,
        dsn: &str,
        options: ExecutorOptions,
        logger: Arc<dyn QueryLogger>,
    ) -> Result<Self, SqlRowMapError> {
        let opened = match driver.parse::<DatabaseType>() {
            Ok(db_type) => DbHandle::open(db_type, dsn, &options).await,
            Err(err) => Err(err),
        };

        match opened {
            Ok(handle) => {
                logger.info("Database connection created successfully");
                Ok(Self::from_handle(handle, options, logger))
            }
            Err(err) => {
                logger.error(&err);
                Err(err)
            }
        }
    }

    /// Wrap an already open handle.
    #[must_use]
    pub fn from_handle(
        handle: DbHandle,
        options: ExecutorOptions,
        logger: Arc<dyn QueryLogger>,
    ) -> Self {
        Self {
            db_type: handle.database_type(),
            handle: Some(handle),
            statement: Statement::new(),
            options,
            logger,
        }
    }

    /// Clear the statement and close the connection.
    ///
    /// # Errors
    /// Returns `SqlRowMapError::ConnectionClosed` if already closed, or the backend's error if
    /// closing fails. The executor counts as closed either way.
    pub async fn close(&mut self) -> Result<(), SqlRowMapError> {
        self.statement.clear();
        let Some(handle) = self.handle.take() else {
            let err = SqlRowMapError::ConnectionClosed;
            self.logger.error(&err);
            return Err(err);
        };

        match handle.close().await {
            Ok(()) => {
                self.logger.info("Close database connection successfully");
                Ok(())
            }
            Err(err) => {
                self.logger
                    .error(&format!("Failed to close database connection: {err}"));
                Err(err)
            }
        }
    }

    /// Append to the statement; see [`Statement::fill`].
    pub fn fill(&mut self, sql: &str, params: &[ParamValue]) -> &mut Self {
        self.statement.fill(sql, params);
        self
    }

    pub fn set_sql(&mut self, sql: &str) -> &mut Self {
        self.statement.set_sql(sql);
        self
    }

    pub fn set_params(&mut self, params: &[ParamValue]) -> &mut Self {
        self.statement.set_params(params);
        self
    }

    #[must_use]
    pub fn get_sql(&self) -> &str {
        self.statement.sql()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.statement.clear();
        self
    }

    #[must_use]
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn statement_mut(&mut self) -> &mut Statement {
        &mut self.statement
    }

    /// The raw connection handle, for work this type does not cover.
    ///
    /// # Errors
    /// Returns `SqlRowMapError::ConnectionClosed` after [`QueryExecutor::close`].
    pub fn get_db(&self) -> Result<&DbHandle, SqlRowMapError> {
        self.handle.as_ref().ok_or(SqlRowMapError::ConnectionClosed)
    }

    /// Swap in another connection, keeping the statement.
    ///
    /// Reopens a closed executor. A previous handle is dropped without being closed.
    pub fn set_db(&mut self, handle: DbHandle) -> &mut Self {
        self.db_type = handle.database_type();
        self.handle = Some(handle);
        self
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    #[must_use]
    pub fn database_type(&self) -> DatabaseType {
        self.db_type
    }

    #[must_use]
    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    /// Run the statement and return every row, in retrieval order.
    ///
    /// Zero matching rows is an empty `RowSet`, not an error.
    ///
    /// # Errors
    /// Returns `SqlRowMapError::ConnectionClosed` after close, `SqlRowMapError::EmptyStatement`
    /// when there is no SQL (the database is not contacted), or the backend's error if execution
    /// or rendering a cell fails.
    pub async fn query_as_list(&self) -> Result<RowSet, SqlRowMapError> {
        let handle = self.ready()?;
        let result = handle
            .select(
                self.statement.sql(),
                self.statement.params(),
                &self.options.null_text,
            )
            .await;
        self.logged(result)
    }

    /// Run the statement and return its first row.
    ///
    /// A query that matched nothing gives an empty `StringRow`; failures are always `Err`.
    ///
    /// # Errors
    /// Same as [`QueryExecutor::query_as_list`].
    pub async fn query(&self) -> Result<StringRow, SqlRowMapError> {
        Ok(self.query_as_list().await?.into_first().unwrap_or_default())
    }

    /// Run the statement as DML and return the affected row count.
    ///
    /// # Errors
    /// Same preconditions as [`QueryExecutor::query_as_list`], plus the backend's execution error.
    pub async fn execute(&self) -> Result<usize, SqlRowMapError> {
        let handle = self.ready()?;
        let result = handle
            .execute(self.statement.sql(), self.statement.params())
            .await;
        self.logged(result)
    }

    fn ready(&self) -> Result<&DbHandle, SqlRowMapError> {
        let checked = match &self.handle {
            None => Err(SqlRowMapError::ConnectionClosed),
            Some(_) if self.statement.is_empty() => Err(SqlRowMapError::EmptyStatement),
            Some(handle) => Ok(handle),
        };
        self.logged(checked)
    }

    fn logged<T>(&self, result: Result<T, SqlRowMapError>) -> Result<T, SqlRowMapError> {
        if let Err(err) = &result {
            self.logger.error(err);
        }
        result
    }
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("handle", &self.handle)
            .field("db_type", &self.db_type)
            .field("statement", &self.statement)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
