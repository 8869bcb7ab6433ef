//! Per-file copy into the new snapshot.
//!
//! Every failure is returned as a [`CopyOutcome::Failed`] value so the
//! orchestrator can record it and move on to the next file.

use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Result of materialising one file
#[derive(Debug)]
pub enum CopyOutcome {
    Copied { bytes: u64 },
    WouldCopy,
    SkippedSameFile,
    Failed(CopyFailure),
}

/// Why a single file could not be copied
#[derive(Error, Debug)]
pub enum CopyFailure {
    #[error("could not create directory '{}': {source}", dir.display())]
    CreateDir {
        dir: std::path::PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("permission denied: {0}")]
    PermissionDenied(#[source] io::Error),

    #[error("{0}")]
    Io(#[source] io::Error),
}

impl CopyFailure {
    fn from_copy_error(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => CopyFailure::PermissionDenied(error),
            _ => CopyFailure::Io(error),
        }
    }
}

/// Filesystem primitive behind the executor
pub trait Copier {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Copy content and metadata, returning the number of bytes copied
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;
}

/// Copier backed by the local filesystem
#[derive(Debug, Clone, Copy)]
pub struct FsCopier {
    preserve_timestamps: bool,
}

impl FsCopier {
    pub fn new(preserve_timestamps: bool) -> Self {
        Self {
            preserve_timestamps,
        }
    }
}

impl Default for FsCopier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Copier for FsCopier {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        // fs::copy carries the permission bits over
        let bytes = fs::copy(from, to)?;

        if self.preserve_timestamps {
            let restored = fs::metadata(from).and_then(|metadata| {
                filetime::set_file_times(
                    to,
                    FileTime::from_last_access_time(&metadata),
                    FileTime::from_last_modification_time(&metadata),
                )
            });
            if let Err(e) = restored {
                warn!(path = %to.display(), error = %e, "Could not preserve timestamps");
            }
        }

        Ok(bytes)
    }
}

/// Copies single files into a snapshot, isolating failures per file
#[derive(Debug)]
pub struct CopyExecutor<C: Copier = FsCopier> {
    copier: C,
}

impl<C: Copier> CopyExecutor<C> {
    pub fn new(copier: C) -> Self {
        Self { copier }
    }

    /// Copy `source_file` to `dest_file`, creating missing parent directories.
    ///
    /// In dry-run mode nothing is touched and `WouldCopy` is returned.
    pub fn copy_one(&self, source_file: &Path, dest_file: &Path, dry_run: bool) -> CopyOutcome {
        if dry_run {
            return CopyOutcome::WouldCopy;
        }

        if is_same_file(source_file, dest_file) {
            return CopyOutcome::SkippedSameFile;
        }

        if let Some(parent) = dest_file.parent() {
            if let Err(source) = self.copier.create_dir_all(parent) {
                return CopyOutcome::Failed(CopyFailure::CreateDir {
                    dir: parent.to_path_buf(),
                    source,
                });
            }
        }

        match self.copier.copy(source_file, dest_file) {
            Ok(bytes) => CopyOutcome::Copied { bytes },
            Err(e) => CopyOutcome::Failed(CopyFailure::from_copy_error(e)),
        }
    }
}

/// Both paths exist and refer to the same file (same device and inode)
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
