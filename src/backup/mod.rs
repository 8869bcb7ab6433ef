//! Backup module providing the snapshot engine.
//!
//! This module implements snapshot discovery, the copy-or-skip policy,
//! per-file copying with failure isolation and the run log.

pub mod engine;
pub mod executor;
pub mod policy;
pub mod progress;
pub mod run_log;
pub mod snapshot;
pub mod types;

// Re-export main types
pub use engine::{BackupEngine, BackupRequest, EngineOptions, FileFailure, RunSummary};
pub use executor::{CopyExecutor, CopyFailure, CopyOutcome, Copier, FsCopier};
pub use policy::{decide, CompareMode, ContentPolicy, CopyReason, Decision, DiffPolicy, SizePolicy};
pub use progress::{ConsoleProgress, Progress, SilentProgress};
pub use run_log::{LogHeader, RunLog, LOG_FILE_NAME};
pub use snapshot::{Snapshot, SnapshotStore, SNAPSHOT_NAME_FORMAT};
pub use types::{BackupMode, TrackedFile};
