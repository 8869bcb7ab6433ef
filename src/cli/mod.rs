//! Command-line interface for NovaSnap.
//!
//! This module provides the CLI using clap: running a backup, listing the
//! snapshots of a destination and inspecting one snapshot's log.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

pub mod backup;
pub mod list;
pub mod show;

/// NovaSnap - Timestamped full and incremental directory snapshots
#[derive(Parser)]
#[command(name = "nova-snap")]
#[command(about = "Timestamped full and incremental directory snapshots with dry-run support")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log format for diagnostics on stderr
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Configuration file (defaults to <config dir>/nova-snap/config.toml)
    #[arg(long, global = true, env = "NOVA_SNAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Back up a directory into a new timestamped snapshot
    Backup(backup::BackupArgs),
    /// List the snapshots in a destination directory
    List(list::ListArgs),
    /// Show the log header of a snapshot
    Show(show::ShowArgs),
}
