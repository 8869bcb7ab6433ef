//! Show command implementation: prints a snapshot's log header.

use clap::Args;
use std::path::PathBuf;

use crate::backup::{RunLog, LOG_FILE_NAME};
use crate::Result;

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Snapshot directory to inspect
    pub snapshot: PathBuf,

    /// Also print every action line
    #[arg(long)]
    pub actions: bool,
}

/// Run the show command
pub fn run(args: ShowArgs) -> Result<()> {
    let (header, log) = RunLog::read(&args.snapshot.join(LOG_FILE_NAME))?;

    println!("Snapshot: {}", header.timestamp);
    println!("  Source: {}", header.source.display());
    println!("  Destination: {}", header.destination.display());
    println!("  Backup type: {}", header.mode.label());
    println!("  Dry run: {}", if header.dry_run { "yes" } else { "no" });
    println!("  Logged actions: {}", log.len());

    if args.actions {
        println!();
        for line in log.lines() {
            println!("  {}", line);
        }
    }

    Ok(())
}
