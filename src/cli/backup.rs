//! Backup command implementation.

use clap::Args;
use std::path::PathBuf;
use tracing::warn;

use crate::backup::{BackupEngine, BackupMode, BackupRequest, CompareMode, ConsoleProgress, FsCopier};
use crate::config::Config;
use crate::Result;

/// Arguments for the backup command
#[derive(Args)]
pub struct BackupArgs {
    /// Source directory to back up
    pub source: PathBuf,

    /// Destination directory holding the snapshots
    pub destination: PathBuf,

    /// Copy every file regardless of previous snapshots
    #[arg(short, long)]
    pub full: bool,

    /// Copy only new or changed files (default)
    #[arg(short, long)]
    pub incremental: bool,

    /// Simulate the backup without copying any files
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, do not create the snapshot directory or its log either
    #[arg(long, requires = "dry_run")]
    pub strict_dry_run: bool,

    /// How incremental runs decide that a file is unchanged
    #[arg(long, value_enum)]
    pub compare: Option<CompareMode>,
}

impl BackupArgs {
    pub fn mode(&self) -> BackupMode {
        BackupMode::from_flags(self.full, self.incremental)
    }

    fn request(&self) -> BackupRequest {
        BackupRequest {
            source: self.source.clone(),
            destination: self.destination.clone(),
            mode: self.mode(),
            dry_run: self.dry_run,
        }
    }
}

/// Run the backup command
pub fn run(args: BackupArgs, config: &Config) -> Result<()> {
    let request = args.request();
    let compare = args.compare.unwrap_or(config.backup.compare);

    let mut options = config.engine_options();
    if args.strict_dry_run {
        options.snapshot_in_dry_run = false;
    }

    let engine = BackupEngine::with_copier(FsCopier::new(config.backup.preserve_timestamps))
        .with_policy(compare.policy())
        .with_options(options);

    if request.dry_run {
        println!("\n*** DRY RUN MODE: No files will be copied. ***\n");
    }
    println!(
        "Starting {} backup from '{}'...",
        request.mode,
        request.source.display()
    );

    let summary = engine.run(&request, &ConsoleProgress)?;

    match (&summary.log_path, &summary.log_error) {
        (Some(path), _) => println!("\nBackup log saved to '{}'", path.display()),
        (None, Some(error)) => eprintln!("\nError: Could not write backup log file: {}", error),
        (None, None) => {}
    }

    if !summary.failures.is_empty() {
        warn!(count = summary.failures.len(), "Some files could not be copied");
        eprintln!("\nFiles that could not be copied:");
        for failure in &summary.failures {
            eprintln!("  {}: {}", failure.relative_path.display(), failure.reason);
        }
    }

    println!("\n{}", summary);
    Ok(())
}
