use std::sync::Arc;

use serde::Serialize;

use super::row::StringRow;

/// The rows produced by one execution, in retrieval order.
///
/// Column names are kept even when no row matched, so callers can still inspect the shape of
/// an empty result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RowSet {
    #[serde(skip)]
    column_names: Arc<Vec<String>>,
    rows: Vec<StringRow>,
}

impl RowSet {
    /// Create an empty result set for the given columns with preallocated capacity
    #[must_use]
    pub fn with_capacity(column_names: Arc<Vec<String>>, capacity: usize) -> RowSet {
        RowSet {
            column_names,
            rows: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Zip the column names with one row's rendered cells and append the row.
    ///
    /// `values` must be in column order; extra values beyond the column count are dropped.
    pub fn push_values(&mut self, values: Vec<String>) {
        let mut row = StringRow::with_capacity(self.column_names.len());
        for (column, value) in self.column_names.iter().zip(values) {
            row.insert(column.as_str(), value);
        }
        self.rows.push(row);
    }

    /// Append an already built row
    pub fn push_row(&mut self, row: StringRow) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn rows(&self) -> &[StringRow] {
        &self.rows
    }

    #[must_use]
    pub fn first(&self) -> Option<&StringRow> {
        self.rows.first()
    }

    /// Consume the set, keeping only the first row
    #[must_use]
    pub fn into_first(self) -> Option<StringRow> {
        self.rows.into_iter().next()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<StringRow> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StringRow> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for RowSet {
    type Item = StringRow;
    type IntoIter = std::vec::IntoIter<StringRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a StringRow;
    type IntoIter = std::slice::Iter<'a, StringRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
