//! Explicit mapping from dialect to connection factory
//!
//! The CLI builds a [`ConnectorRegistry`] at startup and asks it for a
//! connection; tests register their own connectors instead of touching a
//! real server.

use crate::backend::SqlxBackend;
use crate::error::{DbError, DbResult};
use crate::traits::Database;
use futures::future::{BoxFuture, FutureExt};
use sqlup_core::Dialect;
use std::collections::HashMap;

/// Boxed connection handed to the migration applier
pub type BoxedDatabase = Box<dyn Database>;

/// Opens a connection from an unparsed connection string
pub type Connector = fn(String) -> BoxFuture<'static, DbResult<BoxedDatabase>>;

/// Dialect → connector lookup
#[derive(Clone, Default)]
pub struct ConnectorRegistry {
    connectors: HashMap<Dialect, Connector>,
}

impl ConnectorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the sqlx connector for every supported dialect
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Dialect::Postgres, connect_postgres);
        registry.register(Dialect::MySql, connect_mysql);
        registry.register(Dialect::Sqlite3, connect_sqlite);
        registry
    }

    /// Register `connector` for `dialect`, returning the one it replaces
    pub fn register(&mut self, dialect: Dialect, connector: Connector) -> Option<Connector> {
        self.connectors.insert(dialect, connector)
    }

    /// Whether a connector is registered for `dialect`
    pub fn supports(&self, dialect: Dialect) -> bool {
        self.connectors.contains_key(&dialect)
    }

    /// Open a connection for `dialect`
    pub async fn connect(&self, dialect: Dialect, url: &str) -> DbResult<BoxedDatabase> {
        let connector = self
            .connectors
            .get(&dialect)
            .ok_or(DbError::NoConnector(dialect))?;
        log::debug!("Connecting with the {} driver", dialect.driver_name());
        connector(url.to_string()).await
    }
}

fn connect_sqlx(dialect: Dialect, url: String) -> BoxFuture<'static, DbResult<BoxedDatabase>> {
    async move {
        let db = SqlxBackend::connect(dialect, &url).await?;
        Ok(Box::new(db) as BoxedDatabase)
    }
    .boxed()
}

fn connect_postgres(url: String) -> BoxFuture<'static, DbResult<BoxedDatabase>> {
    connect_sqlx(Dialect::Postgres, url)
}

fn connect_mysql(url: String) -> BoxFuture<'static, DbResult<BoxedDatabase>> {
    connect_sqlx(Dialect::MySql, url)
}

fn connect_sqlite(url: String) -> BoxFuture<'static, DbResult<BoxedDatabase>> {
    connect_sqlx(Dialect::Sqlite3, url)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
