use deadpool_postgres::Pool;

use crate::error::SqlRowMapError;
use crate::results::RowSet;
use crate::types::ParamValue;

use super::params::Params;
use super::query::build_row_set;

/// Execute a SELECT on a pooled client and materialize the rows as text.
///
/// # Errors
/// Returns errors from checkout, preparation, execution, or cell rendering.
pub async fn execute_select(
    pool: &Pool,
    query: &str,
    params: &[ParamValue],
    null_text: &str,
) -> Result<RowSet, SqlRowMapError> {
    let client = pool.get().await?;
    build_row_set(&client, query, params, null_text).await
}

/// Execute a DML query (INSERT, UPDATE, DELETE) with parameters
///
/// # Errors
/// Returns errors from checkout, preparation, or execution.
pub async fn execute_dml(
    pool: &Pool,
    query: &str,
    params: &[ParamValue],
) -> Result<usize, SqlRowMapError> {
    let client = pool.get().await?;
    let stmt = client.prepare(query).await?;
    let converted = Params::convert(params);
    let rows = client.execute(&stmt, converted.as_refs()).await?;
    usize::try_from(rows).map_err(|e| {
        SqlRowMapError::ExecutionError(format!("postgres affected rows conversion error: {e}"))
    })
}
