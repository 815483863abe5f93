//! Apply the unapplied part of the SQL file

use anyhow::{Context, Result};
use sqlup_db::{apply_with, ApplyOptions, ApplyOutcome, ConnectorRegistry};

use crate::cli::Cli;
use crate::commands::common::resolve_config;

/// Execute a run with the default connectors
pub(crate) async fn execute(cli: &Cli) -> Result<()> {
    execute_with(cli, &ConnectorRegistry::with_defaults()).await
}

/// Execute a run, opening the connection through `registry`
pub(crate) async fn execute_with(cli: &Cli, registry: &ConnectorRegistry) -> Result<()> {
    let config = resolve_config(cli)?;
    let script = config.read_script()?;

    let mut db = registry
        .connect(config.dbms, &config.connection_string)
        .await
        .context("Failed to open database")?;

    let options = ApplyOptions {
        dry_run: cli.dry_run,
    };
    let outcome = apply_with(db.as_mut(), &script, options)
        .await
        .with_context(|| format!("Failed to apply {}", config.sql_file.display()))?;

    match outcome {
        ApplyOutcome::UpToDate => {
            if cli.verbose || cli.dry_run {
                println!("Already up to date");
            }
        }
        ApplyOutcome::Applied { diff } => {
            if cli.verbose {
                println!("Applied:\n{diff}");
            }
        }
        ApplyOutcome::Pending { diff } => {
            println!("Would apply:\n{diff}");
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "up_test.rs"]
mod tests;
