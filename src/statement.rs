use std::fmt;

use crate::placeholders::count_placeholders;
use crate::types::ParamValue;

/// Mutable SQL text plus its positional parameters.
///
/// `fill` appends to both halves so a statement can be built up piecewise, while `set_sql`,
/// `set_params`, and `clear` replace them for reuse across unrelated queries:
/// ```rust
/// use sql_rowmap::prelude::*;
///
/// let mut stmt = Statement::new();
/// stmt.fill("SELECT id, name FROM users", &[])
///     .fill(" WHERE id = ?", &[ParamValue::Int(3)]);
/// assert_eq!(stmt.sql(), "SELECT id, name FROM users WHERE id = ?");
/// assert_eq!(stmt.params(), &[ParamValue::Int(3)]);
/// ```
///
/// Parameter count and order are not checked against the placeholders in the text; mismatches
/// surface as driver errors at execution time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<ParamValue>,
}

impl Statement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sql` to the text and `params` to the parameter list.
    pub fn fill(&mut self, sql: &str, params: &[ParamValue]) -> &mut Self {
        self.sql.push_str(sql);
        self.params.extend_from_slice(params);
        self
    }

    /// Append a single parameter.
    pub fn push_param(&mut self, param: impl Into<ParamValue>) -> &mut Self {
        self.params.push(param.into());
        self
    }

    /// Replace the SQL text, keeping the parameters.
    pub fn set_sql(&mut self, sql: &str) -> &mut Self {
        self.sql.clear();
        self.sql.push_str(sql);
        self
    }

    /// Replace the parameter list, keeping the SQL text.
    pub fn set_params(&mut self, params: &[ParamValue]) -> &mut Self {
        self.params = params.to_vec();
        self
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[ParamValue] {
        &self.params
    }

    /// True when there is no SQL to run (empty or whitespace only).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }

    /// Placeholders the current text expects; see [`count_placeholders`].
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.sql)
    }

    /// Reset text and parameters. Keeps the text buffer's allocation.
    pub fn clear(&mut self) -> &mut Self {
        self.sql.clear();
        self.params.clear();
        self
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
