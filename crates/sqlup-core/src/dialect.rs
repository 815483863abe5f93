//! Database dialects and the SQL each one uses to manage the state table
//!
//! The set of dialects is closed: supporting a new engine means adding a
//! variant here (driver name, state-table DDL, state queries) and a connector
//! for it in `sqlup-db`.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the table holding the applied script
pub const STATE_TABLE: &str = "sql_up";

/// Supported database engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL
    Postgres,
    /// MySQL / MariaDB
    MySql,
    /// SQLite 3
    Sqlite3,
}

impl Dialect {
    /// Every supported dialect, in display order
    pub const ALL: [Dialect; 3] = [Dialect::Postgres, Dialect::MySql, Dialect::Sqlite3];

    /// The DBMS kind as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite3 => "sqlite3",
        }
    }

    /// Identifier of the driver used to open connections for this dialect
    pub fn driver_name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite3 => "sqlite",
        }
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for the state table.
    ///
    /// `content` must hold scripts of any size; MySQL `TEXT` stops at 64 KiB.
    pub fn state_table_ddl(self) -> &'static str {
        match self {
            Dialect::Postgres => {
                "CREATE TABLE IF NOT EXISTS sql_up (
    content TEXT NOT NULL,
    updated_at TIMESTAMP NOT NULL DEFAULT NOW()
)"
            }
            Dialect::MySql => {
                "CREATE TABLE IF NOT EXISTS sql_up (
    content LONGTEXT NOT NULL,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)"
            }
            Dialect::Sqlite3 => {
                "CREATE TABLE IF NOT EXISTS sql_up (
    content TEXT NOT NULL,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)"
            }
        }
    }

    /// Query returning the applied script, zero or one row.
    ///
    /// On MySQL this is a locking read: it sees the latest committed row and
    /// holds the gap lock on an empty table, so two first runs cannot both
    /// insert.
    pub fn select_state_sql(self) -> &'static str {
        match self {
            Dialect::MySql => "SELECT content FROM sql_up FOR UPDATE",
            Dialect::Postgres | Dialect::Sqlite3 => "SELECT content FROM sql_up",
        }
    }

    /// Statement serializing appliers, run right after `BEGIN` and before the
    /// state row is read.
    ///
    /// Postgres has no row to conflict on before the first insert, so the
    /// table itself is locked in a self-conflicting mode. The snapshot is
    /// taken after the lock is granted, so a waiting applier sees the row
    /// committed by the one it waited for. MySQL locks through
    /// [`select_state_sql`](Self::select_state_sql) and SQLite through
    /// `BEGIN IMMEDIATE`.
    pub fn lock_state_sql(self) -> Option<&'static str> {
        match self {
            Dialect::Postgres => Some("LOCK TABLE sql_up IN SHARE ROW EXCLUSIVE MODE"),
            Dialect::MySql | Dialect::Sqlite3 => None,
        }
    }

    /// Insert the first state row; binds `content` as the only parameter
    pub fn insert_state_sql(self) -> &'static str {
        match self {
            Dialect::Postgres => "INSERT INTO sql_up (content) VALUES ($1)",
            Dialect::MySql | Dialect::Sqlite3 => "INSERT INTO sql_up (content) VALUES (?)",
        }
    }

    /// Replace the state row; binds `content` as the only parameter
    pub fn update_state_sql(self) -> &'static str {
        match self {
            Dialect::Postgres => "UPDATE sql_up SET content = $1, updated_at = NOW()",
            Dialect::MySql | Dialect::Sqlite3 => {
                "UPDATE sql_up SET content = ?, updated_at = CURRENT_TIMESTAMP"
            }
        }
    }

    /// Statement(s) opening the migration transaction.
    ///
    /// Postgres and MySQL run at REPEATABLE READ. SQLite transactions are
    /// always serializable; `IMMEDIATE` takes the write lock before the state
    /// row is read so concurrent appliers queue up instead of failing on
    /// lock upgrade.
    pub fn begin_sql(self) -> &'static str {
        match self {
            Dialect::Postgres => "BEGIN ISOLATION LEVEL REPEATABLE READ",
            Dialect::MySql => {
                "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ; START TRANSACTION"
            }
            Dialect::Sqlite3 => "BEGIN IMMEDIATE",
        }
    }

    /// Whether DDL inside a transaction is undone by `ROLLBACK`.
    ///
    /// MySQL commits implicitly around most DDL statements.
    pub fn supports_transactional_ddl(self) -> bool {
        !matches!(self, Dialect::MySql)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| CoreError::UnsupportedDialect {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
