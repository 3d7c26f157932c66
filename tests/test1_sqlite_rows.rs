#![cfg(feature = "sqlite")]
use std::sync::Arc;

use sql_rowmap::prelude::*;
use tokio::runtime::Runtime;

const SETUP: &str = include_str!("../tests/sqlite/00_users.sql");

async fn seeded_executor(logger: Arc<MemoryLogger>) -> Result<QueryExecutor, SqlRowMapError> {
    let exec = QueryExecutor::open_with("sqlite", ":memory:", ExecutorOptions::default(), logger)
        .await?;
    match exec.get_db()? {
        DbHandle::Sqlite(conn) => {
            conn.with_connection(|db| Ok(db.execute_batch(SETUP)?))
                .await?;
        }
        #[allow(unreachable_patterns)]
        _ => panic!("expected a sqlite handle"),
    }
    Ok(exec)
}

#[test]
fn single_row_lookup_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut exec = seeded_executor(MemoryLogger::new()).await?;

        exec.fill("SELECT id, name FROM users WHERE id = ?", &[ParamValue::Int(3)]);
        let row = exec.query().await?;
        let expected: StringRow = [("id", "3"), ("name", "alice")].into_iter().collect();
        assert_eq!(row, expected);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name"]);

        exec.set_params(&[ParamValue::Int(999)]);
        let missing = exec.query().await?;
        assert!(missing.is_empty());
        assert_eq!(serde_json::to_string(&missing)?, "{}");
        assert!(exec.query_as_list().await?.is_empty());

        exec.close().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn list_keeps_row_and_column_order() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut exec = seeded_executor(MemoryLogger::new()).await?;

        exec.set_sql("SELECT name, id, email FROM users ORDER BY name");
        let rows = exec.query_as_list().await?;

        assert_eq!(rows.column_names(), &["name", "id", "email"]);
        assert_eq!(rows.len(), 3);
        let names: Vec<&str> = rows.iter().filter_map(|r| r.get("name")).collect();
        assert_eq!(names, vec!["alice", "bob", "zoe"]);
        for row in &rows {
            assert_eq!(row.columns().collect::<Vec<_>>(), vec!["name", "id", "email"]);
        }

        // first row of the list is what the single-row call returns
        let first = exec.query().await?;
        assert_eq!(Some(&first), rows.first());

        exec.close().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn every_column_type_collapses_to_text() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut exec = seeded_executor(MemoryLogger::new()).await?;

        exec.fill("SELECT * FROM users WHERE id IN (?, ?) ORDER BY id", &[
            ParamValue::Int(1),
            ParamValue::Int(2),
        ]);
        let rows = exec.query_as_list().await?;

        let zoe = &rows.rows()[0];
        assert_eq!(zoe.get("score"), Some("12.5"));
        assert_eq!(zoe.get("active"), Some("1"));
        assert_eq!(zoe.get("avatar"), Some("zoe"));

        let bob = &rows.rows()[1];
        assert_eq!(bob.get("email"), Some("NULL"));
        assert_eq!(bob.get("avatar"), Some("NULL"));
        assert_eq!(bob.get("score"), Some("7"));
        assert_eq!(bob.len(), 6);

        exec.close().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn statement_is_reusable_after_clear() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut exec = seeded_executor(MemoryLogger::new()).await?;

        exec.fill("SELECT name FROM users", &[])
            .fill(" WHERE active = ?", &[ParamValue::Bool(true)])
            .fill(" AND score > ?", &[ParamValue::Float(50.0)]);
        assert_eq!(
            exec.get_sql(),
            "SELECT name FROM users WHERE active = ? AND score > ?"
        );
        assert_eq!(exec.statement().placeholder_count(), 2);
        let rows = exec.query_as_list().await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0].get("name"), Some("alice"));

        exec.clear();
        assert_eq!(exec.get_sql(), "");
        assert!(exec.statement().params().is_empty());

        exec.fill("SELECT count(*) AS n FROM users", &[]);
        let row = exec.query().await?;
        assert_eq!(row.get("n"), Some("3"));

        exec.close().await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[tokio::test]
async fn dml_reports_rows_affected() -> Result<(), SqlRowMapError> {
    let mut exec = seeded_executor(MemoryLogger::new()).await?;

    exec.fill("UPDATE users SET score = score + ? WHERE active = ?", &[
        ParamValue::Float(1.0),
        ParamValue::Bool(true),
    ]);
    assert_eq!(exec.execute().await?, 2);

    exec.clear().fill("INSERT INTO users (id, name) VALUES (?, ?)", &[
        ParamValue::Int(4),
        ParamValue::from("dave"),
    ]);
    assert_eq!(exec.execute().await?, 1);

    exec.clear().fill("SELECT score FROM users WHERE id = ?", &[ParamValue::Int(1)]);
    let row = exec.query().await?;
    assert_eq!(row.get("score"), Some("13.5"));

    exec.close().await
}

#[tokio::test]
async fn custom_null_sentinel() -> Result<(), SqlRowMapError> {
    let options = ExecutorOptions::builder().null_text("<null>").finish();
    let mut exec =
        QueryExecutor::open_with("sqlite3", ":memory:", options, MemoryLogger::new()).await?;

    exec.fill("SELECT NULL AS missing, '' AS blank", &[]);
    let row = exec.query().await?;
    assert_eq!(row.get("missing"), Some("<null>"));
    assert_eq!(row.get("blank"), Some(""));

    exec.close().await
}
