// SQLite backend
//
// - config: opening a connection from a DSN
// - connection: the shared connection handle and blocking dispatch
// - params: `ParamValue` to rusqlite value conversion
// - query: cell-to-text row materialization

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use connection::SqliteHandle;
pub use params::Params as SqliteParams;
pub use query::{build_row_set, sqlite_cell_text};
