#![cfg(feature = "sqlite")]
use std::sync::Arc;

use sql_rowmap::prelude::*;

async fn open_logged() -> Result<(QueryExecutor, Arc<MemoryLogger>), SqlRowMapError> {
    let logger = MemoryLogger::new();
    let exec = QueryExecutor::open_with(
        "sqlite",
        ":memory:",
        ExecutorOptions::default(),
        logger.clone(),
    )
    .await?;
    Ok((exec, logger))
}

#[tokio::test]
async fn open_logs_success() -> Result<(), SqlRowMapError> {
    let (mut exec, logger) = open_logged().await?;
    assert_eq!(
        logger.entries(),
        vec![(LogLevel::Info, "Database connection created successfully".to_string())]
    );
    assert_eq!(exec.database_type(), DatabaseType::Sqlite);
    exec.close().await
}

#[tokio::test]
async fn unknown_driver_fails_and_is_logged() {
    let logger = MemoryLogger::new();
    let result = QueryExecutor::open_with(
        "oracle",
        "whatever",
        ExecutorOptions::default(),
        logger.clone(),
    )
    .await;

    assert!(matches!(result, Err(SqlRowMapError::UnsupportedDriver(ref d)) if d == "oracle"));
    assert_eq!(logger.errors(), vec!["Unsupported driver: oracle".to_string()]);
}

#[tokio::test]
async fn unopenable_database_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("no_such_dir").join("db.sqlite");
    let logger = MemoryLogger::new();

    let result = QueryExecutor::open_with(
        "sqlite",
        missing.to_str().expect("utf-8 path"),
        ExecutorOptions::default(),
        logger.clone(),
    )
    .await;

    assert!(matches!(result, Err(SqlRowMapError::ConnectionError(_))));
    assert_eq!(logger.errors().len(), 1);
}

#[tokio::test]
async fn empty_statement_is_rejected_before_execution() -> Result<(), SqlRowMapError> {
    let (mut exec, logger) = open_logged().await?;

    let err = exec.query_as_list().await.unwrap_err();
    assert!(matches!(err, SqlRowMapError::EmptyStatement));
    assert_eq!(logger.errors(), vec!["no sql statement".to_string()]);

    exec.set_sql("   ");
    assert!(matches!(exec.query().await, Err(SqlRowMapError::EmptyStatement)));
    assert!(matches!(exec.execute().await, Err(SqlRowMapError::EmptyStatement)));

    exec.close().await
}

#[tokio::test]
async fn execution_failure_is_an_error_not_an_empty_result() -> Result<(), SqlRowMapError> {
    let (mut exec, logger) = open_logged().await?;

    exec.fill("SELECT nope FROM missing_table", &[]);
    let err = exec.query_as_list().await.unwrap_err();
    assert!(matches!(err, SqlRowMapError::SqliteError(_)));
    assert!(matches!(exec.query().await, Err(SqlRowMapError::SqliteError(_))));
    assert_eq!(logger.errors().len(), 2);

    exec.clear().fill("SELECT ?", &[]);
    assert!(exec.query().await.is_err());

    exec.close().await
}

#[tokio::test]
async fn closed_executor_fails_fast() -> Result<(), SqlRowMapError> {
    let (mut exec, logger) = open_logged().await?;
    exec.fill("SELECT 1 AS one", &[]);
    assert_eq!(exec.query().await?.get("one"), Some("1"));

    exec.close().await?;
    assert!(exec.is_closed());
    // close clears the statement
    assert_eq!(exec.get_sql(), "");
    assert!(
        logger
            .entries()
            .contains(&(LogLevel::Info, "Close database connection successfully".to_string()))
    );

    exec.fill("SELECT 1", &[]);
    assert!(matches!(
        exec.query_as_list().await,
        Err(SqlRowMapError::ConnectionClosed)
    ));
    assert!(matches!(exec.get_db(), Err(SqlRowMapError::ConnectionClosed)));
    assert!(matches!(exec.close().await, Err(SqlRowMapError::ConnectionClosed)));
    Ok(())
}

#[tokio::test]
async fn shared_handle_keeps_connection_alive_on_close() -> Result<(), SqlRowMapError> {
    let (mut exec, _logger) = open_logged().await?;
    let shared = exec.get_db()?.clone();

    let err = exec.close().await.unwrap_err();
    assert!(matches!(err, SqlRowMapError::ConnectionError(_)));
    assert!(exec.is_closed());

    match shared {
        DbHandle::Sqlite(conn) => {
            let rows = conn.select("SELECT 2 AS two", &[], "NULL").await?;
            assert_eq!(rows.rows()[0].get("two"), Some("2"));
            conn.close().await
        }
        #[allow(unreachable_patterns)]
        _ => panic!("expected a sqlite handle"),
    }
}

#[tokio::test]
async fn set_db_reopens_closed_executor() -> Result<(), SqlRowMapError> {
    let (mut exec, logger) = open_logged().await?;
    exec.close().await?;
    assert!(exec.is_closed());

    let handle = DbHandle::open(DatabaseType::Sqlite, ":memory:", exec.options()).await?;
    exec.set_db(handle).fill("SELECT ? AS echoed", &[ParamValue::from("back")]);
    assert!(!exec.is_closed());
    assert_eq!(exec.database_type(), DatabaseType::Sqlite);

    let row = exec.query().await?;
    assert_eq!(row.get("echoed"), Some("back"));
    assert!(logger.errors().is_empty());

    exec.close().await
}

#[tokio::test]
async fn set_db_keeps_statement() -> Result<(), SqlRowMapError> {
    let (mut exec, _logger) = open_logged().await?;
    exec.fill("SELECT 5 AS five", &[]);

    let other = DbHandle::open(DatabaseType::Sqlite, ":memory:", exec.options()).await?;
    exec.set_db(other);
    assert_eq!(exec.get_sql(), "SELECT 5 AS five");
    assert_eq!(exec.query().await?.get("five"), Some("5"));

    exec.close().await
}
