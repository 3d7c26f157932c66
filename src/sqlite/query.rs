use std::sync::Arc;

use rusqlite::types::ValueRef;
use rusqlite::{Row, Statement};

use crate::error::SqlRowMapError;
use crate::results::RowSet;

use super::params::Params;

/// Render one `SQLite` cell as text.
///
/// # Errors
///
/// Returns `SqlRowMapError::ScanError` if the cell cannot be read.
pub fn sqlite_cell_text(
    row: &Row<'_>,
    idx: usize,
    column: &str,
    null_text: &str,
) -> Result<String, SqlRowMapError> {
    let value = row
        .get_ref(idx)
        .map_err(|e| SqlRowMapError::scan(column, e.to_string()))?;
    Ok(match value {
        ValueRef::Null => null_text.to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    })
}

/// Run a prepared statement and drain every row into a `RowSet`.
///
/// The row cursor borrows `stmt` and is dropped before this returns, on success or error.
///
/// # Errors
///
/// Returns `SqlRowMapError` if binding, stepping, or rendering a cell fails.
pub fn build_row_set(
    stmt: &mut Statement<'_>,
    params: &Params,
    null_text: &str,
) -> Result<RowSet, SqlRowMapError> {
    let column_names: Arc<Vec<String>> = Arc::new(
        stmt.column_names()
            .iter()
            .map(std::string::ToString::to_string)
            .collect(),
    );

    let param_refs = params.as_refs();
    let mut rows = stmt.query(&param_refs[..])?;
    let mut row_set = RowSet::with_capacity(Arc::clone(&column_names), 10);

    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_names.len());
        for (idx, column) in column_names.iter().enumerate() {
            values.push(sqlite_cell_text(row, idx, column, null_text)?);
        }
        row_set.push_values(values);
    }

    Ok(row_set)
}
