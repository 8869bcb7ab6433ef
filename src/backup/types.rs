//! Shared value types for a backup run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which files a run copies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupMode {
    /// Copy every source file unconditionally
    Full,
    /// Copy only files that are new or changed relative to the baseline
    #[default]
    Incremental,
}

impl BackupMode {
    /// Resolve the mode from the two command-line switches.
    ///
    /// `full` wins when both are given; with neither the run is incremental.
    pub fn from_flags(full: bool, _incremental: bool) -> Self {
        if full {
            BackupMode::Full
        } else {
            BackupMode::Incremental
        }
    }

    /// Label used in the log header ("Full" / "Incremental")
    pub fn label(&self) -> &'static str {
        match self {
            BackupMode::Full => "Full",
            BackupMode::Incremental => "Incremental",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Full" => Some(BackupMode::Full),
            "Incremental" => Some(BackupMode::Incremental),
            _ => None,
        }
    }
}

impl fmt::Display for BackupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupMode::Full => write!(f, "FULL"),
            BackupMode::Incremental => write!(f, "INCREMENTAL"),
        }
    }
}

/// One regular file found under the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    /// Path relative to the source root; the join key against a snapshot
    pub relative_path: PathBuf,
    /// Absolute path of the file in the source tree
    pub source_path: PathBuf,
    /// Size observed during traversal, if metadata was readable
    pub size: Option<u64>,
}
