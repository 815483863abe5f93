//! Error types for sqlup-core

use thiserror::Error;

/// Core error type for sql-up
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: DBMS kind outside the supported set
    #[error("[C001] Unsupported DBMS: {name} (expected one of postgres, mysql, sqlite3)")]
    UnsupportedDialect { name: String },

    /// C002: Configuration file not found
    #[error("[C002] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C003: Failed to parse configuration file
    #[error("[C003] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C004: Invalid or missing configuration value
    #[error("[C004] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C005: Script file could not be read
    #[error("[C005] Failed to read SQL file {path}: {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// C006: IO error with file path context
    #[error("[C006] IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
