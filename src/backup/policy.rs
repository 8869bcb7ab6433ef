//! Copy-or-skip decisions for incremental backups.
//!
//! [`decide`] handles the mode and baseline lookup; whether a file that
//! exists in the baseline counts as unchanged is delegated to a
//! [`DiffPolicy`]. The default [`SizePolicy`] only compares byte sizes, so
//! two files of equal size with different content are treated as identical.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use super::snapshot::Snapshot;
use super::types::{BackupMode, TrackedFile};

/// Read buffer for content hashing (64 KiB)
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Outcome of the diff step for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Copy(CopyReason),
    Skip,
}

/// Why a file is copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyReason {
    /// Full mode, or incremental mode without a baseline
    Unconditional,
    /// Not present in the baseline
    NewFile,
    /// Present in the baseline but judged changed
    Updated,
    /// The comparison itself failed; copy rather than risk a silent skip
    CompareFailed(String),
}

/// Identity check between a source file and its counterpart in the baseline
pub trait DiffPolicy {
    /// Short name used in logs and configuration
    fn name(&self) -> &'static str;

    /// Whether `entry` is unchanged relative to `previous`.
    fn unchanged(&self, entry: &TrackedFile, previous: &Path) -> io::Result<bool>;
}

fn source_size(entry: &TrackedFile) -> io::Result<u64> {
    entry.size.ok_or_else(|| {
        io::Error::other(format!(
            "size of '{}' could not be read",
            entry.source_path.display()
        ))
    })
}

/// Equal byte size means unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct SizePolicy;

impl DiffPolicy for SizePolicy {
    fn name(&self) -> &'static str {
        "size"
    }

    fn unchanged(&self, entry: &TrackedFile, previous: &Path) -> io::Result<bool> {
        Ok(source_size(entry)? == fs::metadata(previous)?.len())
    }
}

/// Equal size and equal BLAKE3 digest means unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentPolicy;

impl ContentPolicy {
    fn digest(path: &Path) -> io::Result<blake3::Hash> {
        let mut file = File::open(path)?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize())
    }
}

impl DiffPolicy for ContentPolicy {
    fn name(&self) -> &'static str {
        "content"
    }

    fn unchanged(&self, entry: &TrackedFile, previous: &Path) -> io::Result<bool> {
        if !SizePolicy.unchanged(entry, previous)? {
            return Ok(false);
        }
        Ok(Self::digest(&entry.source_path)? == Self::digest(previous)?)
    }
}

/// Comparison strategy selectable from the command line and config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Byte size only
    #[default]
    Size,
    /// Byte size, then BLAKE3 content digest
    Content,
}

impl CompareMode {
    pub fn policy(&self) -> Box<dyn DiffPolicy> {
        match self {
            CompareMode::Size => Box::new(SizePolicy),
            CompareMode::Content => Box::new(ContentPolicy),
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMode::Size => write!(f, "size"),
            CompareMode::Content => write!(f, "content"),
        }
    }
}

/// Decide whether `entry` has to be copied into the new snapshot.
pub fn decide<P: DiffPolicy + ?Sized>(
    policy: &P,
    mode: BackupMode,
    entry: &TrackedFile,
    baseline: Option<&Snapshot>,
) -> Decision {
    let baseline = match (mode, baseline) {
        (BackupMode::Incremental, Some(baseline)) => baseline,
        _ => return Decision::Copy(CopyReason::Unconditional),
    };

    let previous = baseline.path().join(&entry.relative_path);
    match previous.try_exists() {
        Ok(false) => Decision::Copy(CopyReason::NewFile),
        Ok(true) => match policy.unchanged(entry, &previous) {
            Ok(true) => Decision::Skip,
            Ok(false) => Decision::Copy(CopyReason::Updated),
            Err(e) => Decision::Copy(CopyReason::CompareFailed(e.to_string())),
        },
        Err(e) => Decision::Copy(CopyReason::CompareFailed(e.to_string())),
    }
}
