//! Snapshot store: one timestamp-named directory per backup run.
//!
//! The store keeps no index. The latest snapshot is always recomputed by
//! listing the destination root and parsing directory names.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::run_log::{LogHeader, LOG_FILE_NAME};
use crate::{Error, Result};

/// Directory name format of a snapshot (local time, second precision)
pub const SNAPSHOT_NAME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A snapshot directory discovered in (or created by) the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub name: String,
    pub path: PathBuf,
    pub created: NaiveDateTime,
}

impl Snapshot {
    /// Parse a directory name as a snapshot timestamp.
    ///
    /// Only the exact zero-padded form is accepted, so that lexicographic
    /// order of names stays chronological.
    pub fn parse_name(name: &str) -> Option<NaiveDateTime> {
        let created = NaiveDateTime::parse_from_str(name, SNAPSHOT_NAME_FORMAT).ok()?;
        (snapshot_name(created) == name).then_some(created)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the run that created this snapshot was a dry run.
    ///
    /// Snapshots without a readable log header count as real ones.
    pub fn is_dry_run(&self) -> bool {
        LogHeader::read_from(&self.path.join(LOG_FILE_NAME))
            .map(|header| header.dry_run)
            .unwrap_or(false)
    }
}

/// Format a timestamp as a snapshot directory name
pub fn snapshot_name(created: NaiveDateTime) -> String {
    created.format(SNAPSHOT_NAME_FORMAT).to_string()
}

/// Filesystem area holding the snapshots of one destination
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// All snapshots in the store, newest first.
    ///
    /// Entries that are not directories or whose names are not snapshot
    /// timestamps are ignored.
    pub fn list(&self) -> Result<Vec<Snapshot>> {
        let entries = fs::read_dir(&self.root).map_err(|source| Error::SnapshotListing {
            path: self.root.clone(),
            source,
        })?;

        let mut snapshots = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            match Snapshot::parse_name(&name) {
                Some(created) => snapshots.push(Snapshot {
                    name,
                    path,
                    created,
                }),
                None => debug!(name = %name, "Ignoring non-snapshot directory"),
            }
        }

        snapshots.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(snapshots)
    }

    /// Most recent snapshot, or `None` when the store holds none
    pub fn discover_latest(&self) -> Result<Option<Snapshot>> {
        self.latest_excluding(None)
    }

    /// Most recent snapshot other than `exclude`.
    ///
    /// A run passes the name of the snapshot it just created so that its own
    /// empty directory is never picked as the baseline.
    pub fn latest_excluding(&self, exclude: Option<&str>) -> Result<Option<Snapshot>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|snapshot| Some(snapshot.name.as_str()) != exclude))
    }

    /// Most recent snapshot usable as an incremental baseline.
    ///
    /// Like [`SnapshotStore::latest_excluding`], but also passes over
    /// snapshots left behind by dry runs, which hold no copied files.
    pub fn latest_baseline(&self, exclude: Option<&str>) -> Result<Option<Snapshot>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|snapshot| Some(snapshot.name.as_str()) != exclude)
            .find(|snapshot| {
                let dry_run = snapshot.is_dry_run();
                if dry_run {
                    debug!(name = %snapshot.name, "Ignoring dry-run snapshot as baseline");
                }
                !dry_run
            }))
    }

    /// Path a snapshot taken at `created` would live at
    pub fn snapshot_path(&self, created: NaiveDateTime) -> PathBuf {
        self.root.join(snapshot_name(created))
    }

    /// Create the directory for a new snapshot.
    ///
    /// Refuses to reuse an existing directory: snapshots are never written
    /// to after the run that created them.
    pub fn create(&self, created: NaiveDateTime) -> Result<Snapshot> {
        let name = snapshot_name(created);
        let path = self.root.join(&name);

        fs::create_dir(&path).map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => Error::SnapshotExists { path: path.clone() },
            _ => Error::SnapshotCreate {
                path: path.clone(),
                source,
            },
        })?;

        debug!(path = %path.display(), "Created snapshot directory");
        Ok(Snapshot {
            name,
            path,
            created,
        })
    }
}
