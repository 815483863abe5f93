//! CLI argument definitions using clap derive API

use clap::Parser;
use std::path::PathBuf;

/// sql-up - apply an append-only SQL script, one new segment at a time
#[derive(Parser, Debug)]
#[command(name = "sql-up")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database management system (postgres, mysql, sqlite3)
    #[arg(short, long, env = "SQL_UP_DBMS")]
    pub dbms: Option<String>,

    /// Connection string, passed to the driver as-is
    #[arg(
        short,
        long = "connection-string",
        env = "SQL_UP_CONNECTION_STRING",
        hide_env_values = true
    )]
    pub connection_string: Option<String>,

    /// SQL file
    #[arg(short = 'f', long, env = "SQL_UP_SQL_FILE")]
    pub sql_file: Option<PathBuf>,

    /// YAML file providing any of the settings above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the SQL that would run without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
