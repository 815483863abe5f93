//! sqlup-core - Core library for sql-up
//!
//! This crate provides the database dialects, configuration parsing, and the
//! pure script-diffing logic shared by the database layer and the CLI.

pub mod config;
pub mod dialect;
pub mod error;
pub mod script;

pub use config::{Config, ConfigFile};
pub use dialect::{Dialect, STATE_TABLE};
pub use error::{CoreError, CoreResult};
pub use script::{compute_diff, Diff, DiffError, SENTINEL};
