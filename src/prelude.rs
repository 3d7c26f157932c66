//! Convenient imports for common functionality.

pub use crate::config::{ExecutorOptions, ExecutorOptionsBuilder};
pub use crate::connection::DbHandle;
pub use crate::error::SqlRowMapError;
pub use crate::executor::QueryExecutor;
pub use crate::logging::{LogLevel, MemoryLogger, QueryLogger, TracingLogger};
pub use crate::results::{RowSet, StringRow};
pub use crate::statement::Statement;
pub use crate::types::{DatabaseType, ParamValue};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteHandle;
