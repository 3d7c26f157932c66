// PostgreSQL backend
//
// - config: DSN parsing and pool setup
// - params: `ParamValue` to `ToSql` conversion
// - query: cell-to-text row materialization
// - executor: running statements on a pooled client

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use executor::{execute_dml, execute_select};
pub use params::Params as PostgresParams;
pub use query::{build_row_set, postgres_cell_text};
