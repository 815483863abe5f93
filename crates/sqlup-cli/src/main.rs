//! sql-up CLI - apply an append-only SQL script exactly once per new segment

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::Cli;
use commands::{common, up};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match up::execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
