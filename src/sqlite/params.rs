use rusqlite::types::Value;

use crate::types::ParamValue;

/// Convert a single `ParamValue` to a rusqlite `Value`.
#[must_use]
pub fn param_to_sqlite_value(value: &ParamValue) -> Value {
    match value {
        ParamValue::Int(i) => Value::Integer(*i),
        ParamValue::Float(f) => Value::Real(*f),
        ParamValue::Text(s) => Value::Text(s.clone()),
        ParamValue::Bool(b) => Value::Integer(i64::from(*b)),
        ParamValue::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        ParamValue::Null => Value::Null,
        ParamValue::Json(jval) => Value::Text(jval.to_string()),
        ParamValue::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Owned `SQLite` parameters, ready to move onto a blocking thread.
#[derive(Debug, Clone, Default)]
pub struct Params(pub Vec<Value>);

impl Params {
    #[must_use]
    pub fn convert(params: &[ParamValue]) -> Self {
        Params(params.iter().map(param_to_sqlite_value).collect())
    }

    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.0.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn converts_each_variant() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let params = Params::convert(&[
            ParamValue::Int(3),
            ParamValue::Bool(true),
            ParamValue::Timestamp(ts),
            ParamValue::Json(json!({"a": 1})),
            ParamValue::Null,
        ]);

        assert_eq!(
            params.0,
            vec![
                Value::Integer(3),
                Value::Integer(1),
                Value::Text("2024-05-01 12:30:00".to_string()),
                Value::Text(r#"{"a":1}"#.to_string()),
                Value::Null,
            ]
        );
        assert_eq!(params.as_refs().len(), 5);
    }
}
