//! NovaSnap - Timestamped full and incremental directory snapshots
//!
//! Main binary entry point for the command-line interface.

use anyhow::Context;
use clap::Parser;
use nova_snap::cli::{Cli, Commands};
use nova_snap::{logging, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init_logging(
        &config.logging.level,
        cli.verbose,
        cli.log_format.unwrap_or(config.logging.format),
    )?;

    match cli.command {
        Commands::Backup(args) => {
            nova_snap::cli::backup::run(args, &config).context("Backup failed")
        }
        Commands::List(args) => nova_snap::cli::list::run(args).context("Could not list snapshots"),
        Commands::Show(args) => nova_snap::cli::show::run(args).context("Could not read snapshot log"),
    }
}
