//! # NovaSnap
//!
//! Timestamped full and incremental directory snapshots.
//!
//! ## Features
//!
//! - **Snapshot Store**: one `YYYY-MM-DD_HH-MM-SS` directory per run, latest
//!   snapshot recomputed from directory names
//! - **Incremental Backups**: size-based (or opt-in content-based) change detection
//! - **Fault Isolation**: a failing file is logged and skipped, the run goes on
//! - **Dry Run**: full decision log without copying anything
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nova_snap::backup::{BackupEngine, BackupMode, BackupRequest, ConsoleProgress};
//! use std::path::PathBuf;
//!
//! # fn main() -> nova_snap::Result<()> {
//! let engine = BackupEngine::new();
//! let request = BackupRequest {
//!     source: PathBuf::from("./my-data"),
//!     destination: PathBuf::from("./backups"),
//!     mode: BackupMode::Incremental,
//!     dry_run: false,
//! };
//!
//! let summary = engine.run(&request, &ConsoleProgress)?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use backup::{BackupEngine, BackupMode, BackupRequest, RunSummary, SnapshotStore};
pub use config::Config;
pub use error::{Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
