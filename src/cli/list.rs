//! List command implementation for browsing snapshots.

use clap::Args;
use std::path::PathBuf;

use crate::backup::SnapshotStore;
use crate::Result;

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    /// Destination directory holding the snapshots
    pub destination: PathBuf,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the list command
pub fn run(args: ListArgs) -> Result<()> {
    let store = SnapshotStore::new(&args.destination);
    let snapshots = store.list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    if snapshots.is_empty() {
        println!("No snapshots found in: {}", args.destination.display());
        return Ok(());
    }

    println!("Snapshots in {} (newest first):\n", args.destination.display());
    for snapshot in &snapshots {
        let marker = if snapshot.is_dry_run() { " (dry run)" } else { "" };
        println!("  {}{}", snapshot.name, marker);
    }
    println!("\nTotal: {} snapshots", snapshots.len());

    Ok(())
}
