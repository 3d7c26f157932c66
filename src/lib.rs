//! Accumulate a SQL statement and its positional parameters, run it, and get every row back as
//! an ordered map of column name to text.
//!
//! ```rust,no_run
//! use sql_rowmap::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlRowMapError> {
//! let mut exec = QueryExecutor::open("sqlite", "app.db").await?;
//! exec.set_sql("SELECT id, name FROM users WHERE id > ?")
//!     .set_params(&[ParamValue::Int(10)]);
//! for row in exec.query_as_list().await? {
//!     println!("{:?}", row.get("name"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod logging;
mod placeholders;
pub mod prelude;
pub mod results;
pub mod statement;
pub mod types;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::{DEFAULT_NULL_TEXT, ExecutorOptions, ExecutorOptionsBuilder};
pub use connection::DbHandle;
pub use error::SqlRowMapError;
pub use executor::QueryExecutor;
pub use logging::{LogLevel, MemoryLogger, QueryLogger, TracingLogger};
pub use placeholders::count_placeholders;
pub use results::{RowSet, StringRow};
pub use statement::Statement;
pub use types::{DatabaseType, ParamValue};
