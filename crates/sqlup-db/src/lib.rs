//! sqlup-db - Database layer for sql-up
//!
//! This crate provides the `Database` trait, its sqlx-backed implementation
//! for PostgreSQL, MySQL and SQLite, the dialect-to-connector registry, and
//! the migration applier that runs the unapplied part of a script.

pub mod backend;
pub mod error;
pub mod migration;
pub mod registry;
pub mod traits;

pub use backend::SqlxBackend;
pub use error::{DbError, DbResult, MigrationError, MigrationResult};
pub use migration::{apply, apply_with, ApplyOptions, ApplyOutcome};
pub use registry::{BoxedDatabase, Connector, ConnectorRegistry};
pub use traits::Database;
