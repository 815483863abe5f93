//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use log::LevelFilter;
use sqlup_core::{Config, ConfigFile};

use crate::cli::Cli;

/// Initialise `env_logger`.
///
/// Defaults to `warn`, or `debug` with `--verbose`; `RUST_LOG` overrides both.
pub(crate) fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .format_target(false)
        .init();
}

/// Merge flags and environment (already folded together by clap) over the
/// optional `--config` file.
pub(crate) fn resolve_config(cli: &Cli) -> Result<Config> {
    let file = match &cli.config {
        Some(path) => Some(
            ConfigFile::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
        ),
        None => None,
    };

    let overrides = ConfigFile {
        dbms: cli.dbms.clone(),
        connection_string: cli.connection_string.clone(),
        sql_file: cli.sql_file.clone(),
    };

    Ok(Config::resolve(overrides, file)?)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
