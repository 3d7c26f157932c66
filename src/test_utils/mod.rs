//! Helpers for exercising the Postgres backend against a throwaway server.

/// `PostgreSQL` embedded database functionality
pub mod postgres;

pub use postgres::EmbeddedPostgres;
