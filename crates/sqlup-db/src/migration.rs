//! Migration applier for append-only SQL scripts.
//!
//! The full text of the last applied script lives in the single-row `sql_up`
//! table. Each run strips that text from the front of the new script and
//! executes the remainder, then stores the new script, all inside one
//! transaction:
//!
//! 1. `CREATE TABLE IF NOT EXISTS sql_up` (outside the transaction)
//! 2. `BEGIN` at the dialect's isolation level
//! 3. lock the state table, then read the applied script (no row means
//!    nothing applied yet)
//! 4. identical script: release the transaction, nothing to do
//! 5. compute and validate the diff (prefix match, then sentinel)
//! 6. execute the diff
//! 7. insert or update the state row
//! 8. `COMMIT`
//!
//! Any failure from step 3 on rolls the transaction back.

use crate::error::{MigrationError, MigrationResult};
use crate::traits::Database;
use sqlup_core::{compute_diff, Diff};

/// Knobs for a single apply run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Compute and validate the diff, then roll back without executing it
    pub dry_run: bool,
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The stored script already matches; nothing was executed
    UpToDate,
    /// `diff` was executed and the new script committed
    Applied { diff: String },
    /// Dry run: `diff` is valid and would be executed
    Pending { diff: String },
}

/// How the open transaction ends after a successful run
enum TxEnd {
    Commit(ApplyOutcome),
    Release(ApplyOutcome),
}

/// Apply the unapplied part of `script` to `db`.
pub async fn apply(db: &mut dyn Database, script: &str) -> MigrationResult<ApplyOutcome> {
    apply_with(db, script, ApplyOptions::default()).await
}

/// Apply the unapplied part of `script` to `db` with explicit options.
pub async fn apply_with(
    db: &mut dyn Database,
    script: &str,
    options: ApplyOptions,
) -> MigrationResult<ApplyOutcome> {
    ensure_state_table(db).await?;

    db.begin().await.map_err(MigrationError::TransactionFailed)?;

    let outcome = match apply_in_transaction(db, script, options).await {
        Ok(TxEnd::Commit(outcome)) => {
            if let Err(e) = db.commit().await {
                rollback_quietly(db).await;
                return Err(MigrationError::CommitFailed(e));
            }
            outcome
        }
        Ok(TxEnd::Release(outcome)) => {
            rollback_quietly(db).await;
            outcome
        }
        Err(e) => {
            rollback_quietly(db).await;
            return Err(e);
        }
    };

    match &outcome {
        ApplyOutcome::UpToDate => log::info!("sql_up is up to date"),
        ApplyOutcome::Applied { diff } => log::info!("Applied {} bytes of new SQL", diff.len()),
        ApplyOutcome::Pending { diff } => {
            log::info!("Dry run: {} bytes of new SQL pending", diff.len())
        }
    }
    Ok(outcome)
}

/// Create the `sql_up` table if it does not exist yet.
async fn ensure_state_table(db: &mut dyn Database) -> MigrationResult<()> {
    let ddl = db.dialect().state_table_ddl();
    db.execute_batch(ddl)
        .await
        .map_err(MigrationError::StateTableCreationFailed)?;
    log::debug!("State table sql_up ensured on {}", db.db_type());
    Ok(())
}

async fn apply_in_transaction(
    db: &mut dyn Database,
    script: &str,
    options: ApplyOptions,
) -> MigrationResult<TxEnd> {
    let dialect = db.dialect();

    if let Some(lock) = dialect.lock_state_sql() {
        db.execute_batch(lock)
            .await
            .map_err(MigrationError::StateReadFailed)?;
    }

    let stored = db
        .query_optional_text(dialect.select_state_sql())
        .await
        .map_err(MigrationError::StateReadFailed)?;
    let has_row = stored.is_some();
    let applied = stored.unwrap_or_default();
    log::debug!(
        "Applied script: {} bytes, new script: {} bytes",
        applied.len(),
        script.len()
    );

    let diff = match compute_diff(&applied, script)? {
        Diff::UpToDate => return Ok(TxEnd::Release(ApplyOutcome::UpToDate)),
        Diff::Pending(diff) => diff,
    };
    log::debug!("Diff to apply:\n{diff}");

    if options.dry_run {
        return Ok(TxEnd::Release(ApplyOutcome::Pending {
            diff: diff.to_string(),
        }));
    }

    if let Err(e) = db.execute_batch(diff).await {
        if !dialect.supports_transactional_ddl() {
            log::warn!(
                "{dialect} does not roll back DDL; statements before the failure may have been kept"
            );
        }
        return Err(MigrationError::MigrationExecutionFailed(e));
    }

    let state_sql = if has_row {
        dialect.update_state_sql()
    } else {
        dialect.insert_state_sql()
    };
    db.execute_with_text(state_sql, script)
        .await
        .map_err(MigrationError::StateWriteFailed)?;

    Ok(TxEnd::Commit(ApplyOutcome::Applied {
        diff: diff.to_string(),
    }))
}

async fn rollback_quietly(db: &mut dyn Database) {
    if let Err(e) = db.rollback().await {
        log::warn!("Rollback failed: {e}");
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
