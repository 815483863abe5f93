//! Run configuration
//!
//! Settings come from up to two layers: an optional YAML file and explicit
//! overrides (command-line flags or environment variables). [`Config::resolve`]
//! merges them, overrides winning, and validates the result.

use crate::dialect::Dialect;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One layer of settings, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// DBMS kind (postgres, mysql, sqlite3)
    #[serde(default)]
    pub dbms: Option<String>,

    /// Connection string handed to the driver unparsed
    #[serde(default)]
    pub connection_string: Option<String>,

    /// Path to the append-only SQL script
    #[serde(default)]
    pub sql_file: Option<PathBuf>,
}

impl ConfigFile {
    /// Load a settings layer from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: ConfigFile = serde_yaml::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(file)
    }

    /// Fill unset fields of `self` from `fallback`
    pub fn or(self, fallback: ConfigFile) -> ConfigFile {
        ConfigFile {
            dbms: self.dbms.or(fallback.dbms),
            connection_string: self.connection_string.or(fallback.connection_string),
            sql_file: self.sql_file.or(fallback.sql_file),
        }
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub dbms: Dialect,
    pub connection_string: String,
    pub sql_file: PathBuf,
}

impl Config {
    /// Merge `overrides` over the optional `file` layer and validate
    pub fn resolve(overrides: ConfigFile, file: Option<ConfigFile>) -> CoreResult<Self> {
        let merged = overrides.or(file.unwrap_or_default());

        let dbms = required(merged.dbms, "dbms")?.parse::<Dialect>()?;
        let connection_string = required(merged.connection_string, "connection_string")?;
        let sql_file = merged
            .sql_file
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| missing("sql_file"))?;

        Ok(Config {
            dbms,
            connection_string,
            sql_file,
        })
    }

    /// Read the SQL script named by `sql_file`
    pub fn read_script(&self) -> CoreResult<String> {
        std::fs::read_to_string(&self.sql_file).map_err(|e| CoreError::ScriptRead {
            path: self.sql_file.display().to_string(),
            source: e,
        })
    }
}

fn required(value: Option<String>, field: &str) -> CoreResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

fn missing(field: &str) -> CoreError {
    CoreError::ConfigInvalid {
        message: format!("missing required setting '{field}'"),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
