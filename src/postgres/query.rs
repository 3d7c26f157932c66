use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio_postgres::types::{FromSql, Type};
use tokio_postgres::{Client, Row};
use uuid::Uuid;

use crate::error::SqlRowMapError;
use crate::results::RowSet;
use crate::types::ParamValue;

use super::params::Params;

/// Prepare and run `query`, then render every cell of every row as text.
///
/// # Errors
/// Returns errors from preparation, execution, or cell rendering.
pub async fn build_row_set(
    client: &Client,
    query: &str,
    params: &[ParamValue],
    null_text: &str,
) -> Result<RowSet, SqlRowMapError> {
    let stmt = client.prepare(query).await?;
    let column_names: Arc<Vec<String>> = Arc::new(
        stmt.columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect(),
    );

    let converted = Params::convert(params);
    let rows = client.query(&stmt, converted.as_refs()).await?;

    let mut row_set = RowSet::with_capacity(Arc::clone(&column_names), rows.len());
    for row in &rows {
        let mut values = Vec::with_capacity(column_names.len());
        for idx in 0..column_names.len() {
            values.push(postgres_cell_text(row, idx, null_text)?);
        }
        row_set.push_values(values);
    }

    Ok(row_set)
}

/// Render the cell at `idx` as text, using `null_text` for SQL NULL.
///
/// # Errors
/// Returns `SqlRowMapError::ScanError` if the column type has no text rendering.
pub fn postgres_cell_text(
    row: &Row,
    idx: usize,
    null_text: &str,
) -> Result<String, SqlRowMapError> {
    let column = &row.columns()[idx];
    let name = column.name();

    let text = match *column.type_() {
        Type::BOOL => get(row, idx, name, |v: bool| v.to_string())?,
        Type::INT2 => get(row, idx, name, |v: i16| v.to_string())?,
        Type::INT4 => get(row, idx, name, |v: i32| v.to_string())?,
        Type::INT8 => get(row, idx, name, |v: i64| v.to_string())?,
        Type::OID => get(row, idx, name, |v: u32| v.to_string())?,
        Type::FLOAT4 => get(row, idx, name, |v: f32| v.to_string())?,
        Type::FLOAT8 => get(row, idx, name, |v: f64| v.to_string())?,
        Type::NUMERIC => get(row, idx, name, |v: Decimal| v.to_string())?,
        Type::JSON | Type::JSONB => get(row, idx, name, |v: Value| v.to_string())?,
        Type::BYTEA => get(row, idx, name, |v: Vec<u8>| {
            String::from_utf8_lossy(&v).into_owned()
        })?,
        Type::UUID => get(row, idx, name, |v: Uuid| v.to_string())?,
        Type::DATE => get(row, idx, name, |v: NaiveDate| v.format("%Y-%m-%d").to_string())?,
        Type::TIME => get(row, idx, name, |v: NaiveTime| v.format("%H:%M:%S%.f").to_string())?,
        Type::TIMESTAMP => get(row, idx, name, |v: NaiveDateTime| {
            v.format("%Y-%m-%d %H:%M:%S%.f").to_string()
        })?,
        Type::TIMESTAMPTZ => get(row, idx, name, |v: DateTime<Utc>| v.to_rfc3339())?,
        Type::VOID => None,
        // text, varchar, bpchar, name, unknown, and anything else String can decode
        _ => get(row, idx, name, |v: String| v)?,
    };

    Ok(text.unwrap_or_else(|| null_text.to_string()))
}

fn get<'r, T, F>(
    row: &'r Row,
    idx: usize,
    column: &str,
    render: F,
) -> Result<Option<String>, SqlRowMapError>
where
    T: FromSql<'r>,
    F: FnOnce(T) -> String,
{
    let value: Option<T> = row
        .try_get(idx)
        .map_err(|e| SqlRowMapError::scan(column, e.to_string()))?;
    Ok(value.map(render))
}
