//! Database trait definition

use crate::error::{DbError, DbResult};
use async_trait::async_trait;
use sqlup_core::Dialect;

/// A single open connection the migration applier drives.
///
/// Every method takes `&mut self`: one connection carries at most one
/// transaction, and the applier owns it exclusively for the whole run.
/// Transactions are controlled with plain SQL so each dialect can choose its
/// own isolation statement.
#[async_trait]
pub trait Database: Send {
    /// Dialect this connection speaks
    fn dialect(&self) -> Dialect;

    /// Execute one or more statements with no parameters
    async fn execute_batch(&mut self, sql: &str) -> DbResult<()>;

    /// Execute a statement binding `value` as its only parameter, returns affected rows
    async fn execute_with_text(&mut self, sql: &str, value: &str) -> DbResult<u64>;

    /// Fetch the first column of the first row as text, `None` when there are no rows
    async fn query_optional_text(&mut self, sql: &str) -> DbResult<Option<String>>;

    /// Open a transaction at the dialect's migration isolation level
    async fn begin(&mut self) -> DbResult<()> {
        let sql = self.dialect().begin_sql();
        self.execute_batch(sql)
            .await
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))
    }

    /// Commit the open transaction
    async fn commit(&mut self) -> DbResult<()> {
        self.execute_batch("COMMIT")
            .await
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))
    }

    /// Roll back the open transaction
    async fn rollback(&mut self) -> DbResult<()> {
        self.execute_batch("ROLLBACK")
            .await
            .map_err(|e| DbError::TransactionError(format!("ROLLBACK failed: {e}")))
    }

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str {
        self.dialect().driver_name()
    }
}
