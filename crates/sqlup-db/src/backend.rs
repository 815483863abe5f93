//! sqlx-backed database connection for every supported dialect

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use sqlup_core::Dialect;
use sqlx::{Connection, MySqlConnection, PgConnection, SqliteConnection};

enum Conn {
    Postgres(PgConnection),
    MySql(MySqlConnection),
    Sqlite(SqliteConnection),
}

/// Run `$body` with `$c` bound to the concrete sqlx connection.
///
/// Each arm is type-checked on its own, so the body can stay generic over
/// the driver.
macro_rules! with_conn {
    ($conn:expr, $c:ident => $body:expr) => {
        match $conn {
            Conn::Postgres($c) => $body,
            Conn::MySql($c) => $body,
            Conn::Sqlite($c) => $body,
        }
    };
}

/// A single sqlx connection to PostgreSQL, MySQL or SQLite
pub struct SqlxBackend {
    conn: Conn,
}

impl SqlxBackend {
    /// Open a connection; `url` is passed to the driver unparsed
    pub async fn connect(dialect: Dialect, url: &str) -> DbResult<Self> {
        let conn = match dialect {
            Dialect::Postgres => Conn::Postgres(
                PgConnection::connect(url)
                    .await
                    .map_err(|e| connection_error(dialect, e))?,
            ),
            Dialect::MySql => Conn::MySql(
                MySqlConnection::connect(url)
                    .await
                    .map_err(|e| connection_error(dialect, e))?,
            ),
            Dialect::Sqlite3 => Conn::Sqlite(
                SqliteConnection::connect(url)
                    .await
                    .map_err(|e| connection_error(dialect, e))?,
            ),
        };
        log::debug!("Opened {} connection", dialect.driver_name());
        Ok(Self { conn })
    }

    /// Open a private in-memory SQLite database
    pub async fn sqlite_memory() -> DbResult<Self> {
        Self::connect(Dialect::Sqlite3, "sqlite::memory:").await
    }

    /// Close the connection gracefully
    pub async fn close(self) -> DbResult<()> {
        with_conn!(self.conn, c => c
            .close()
            .await
            .map_err(|e| DbError::ConnectionError(format!("close failed: {e}"))))
    }
}

fn connection_error(dialect: Dialect, err: sqlx::Error) -> DbError {
    DbError::ConnectionError(format!("{} driver: {err}", dialect.driver_name()))
}

#[async_trait]
impl Database for SqlxBackend {
    fn dialect(&self) -> Dialect {
        match self.conn {
            Conn::Postgres(_) => Dialect::Postgres,
            Conn::MySql(_) => Dialect::MySql,
            Conn::Sqlite(_) => Dialect::Sqlite3,
        }
    }

    async fn execute_batch(&mut self, sql: &str) -> DbResult<()> {
        with_conn!(&mut self.conn, c => {
            sqlx::Executor::execute(&mut *c, sqlx::raw_sql(sql))
                .await
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        });
        Ok(())
    }

    async fn execute_with_text(&mut self, sql: &str, value: &str) -> DbResult<u64> {
        let affected = with_conn!(&mut self.conn, c => sqlx::query(sql)
            .bind(value)
            .execute(&mut *c)
            .await
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?
            .rows_affected());
        Ok(affected)
    }

    async fn query_optional_text(&mut self, sql: &str) -> DbResult<Option<String>> {
        let value = with_conn!(&mut self.conn, c => sqlx::query_scalar::<_, String>(sql)
            .fetch_optional(&mut *c)
            .await
            .map_err(|e| DbError::QueryError(format!("{e}: {sql}")))?);
        Ok(value)
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
