//! Error types for sqlup-db

use sqlup_core::{Dialect, DiffError};
use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Query error (D003)
    #[error("[D003] SQL query failed: {0}")]
    QueryError(String),

    /// Transaction control error (D004)
    #[error("[D004] Transaction control failed: {0}")]
    TransactionError(String),

    /// No connector registered for the dialect (D005)
    #[error("[D005] No connector registered for {0}")]
    NoConnector(Dialect),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

/// Migration applier errors, one variant per phase that can fail
#[derive(Error, Debug)]
pub enum MigrationError {
    /// Creating the `sql_up` table failed (M001)
    #[error("[M001] Failed to create table sql_up")]
    StateTableCreationFailed(#[source] DbError),

    /// Opening the migration transaction failed (M002)
    #[error("[M002] Failed to begin transaction")]
    TransactionFailed(#[source] DbError),

    /// Reading the applied script failed (M003)
    #[error("[M003] Failed to query sql_up")]
    StateReadFailed(#[source] DbError),

    /// The applied script is not a prefix of the new one (M004)
    #[error("[M004] SQL file was modified in place")]
    PrefixMismatch(#[source] DiffError),

    /// The unapplied suffix does not start with the sentinel (M005)
    #[error("[M005] Invalid migration diff")]
    InvalidMigrationDiff(#[source] DiffError),

    /// The diff failed to execute; the transaction was rolled back (M006)
    #[error("[M006] Failed to apply new update")]
    MigrationExecutionFailed(#[source] DbError),

    /// Writing the new script to `sql_up` failed (M007)
    #[error("[M007] Failed to update sql_up state table")]
    StateWriteFailed(#[source] DbError),

    /// COMMIT failed; whether the diff is durable is unknown (M008)
    #[error("[M008] Failed to commit transaction (outcome unknown, re-run to reconcile)")]
    CommitFailed(#[source] DbError),
}

impl MigrationError {
    /// True when the database may or may not hold the new state.
    ///
    /// Re-running is safe: an applied diff short-circuits as up to date.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, MigrationError::CommitFailed(_))
    }
}

impl From<DiffError> for MigrationError {
    fn from(err: DiffError) -> Self {
        match err {
            DiffError::PrefixMismatch { .. } => MigrationError::PrefixMismatch(err),
            DiffError::MissingSentinel { .. } => MigrationError::InvalidMigrationDiff(err),
        }
    }
}

/// Result type alias for MigrationError
pub type MigrationResult<T> = Result<T, MigrationError>;
