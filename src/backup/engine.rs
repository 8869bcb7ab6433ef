//! Backup orchestrator: drives one run from path validation to summary.
//!
//! A run walks the source tree once, sequentially. Per-file problems are
//! recorded in the run log and counted as skipped; only invalid input paths
//! and a failure to create the snapshot directory abort the run.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use super::executor::{CopyExecutor, CopyFailure, CopyOutcome, Copier, FsCopier};
use super::policy::{decide, CopyReason, Decision, DiffPolicy, SizePolicy};
use super::progress::Progress;
use super::run_log::{LogHeader, RunLog, LOG_FILE_NAME};
use super::snapshot::{snapshot_name, Snapshot, SnapshotStore};
use super::types::{BackupMode, TrackedFile};
use crate::{Error, Result};

/// What to back up, where, and how
#[derive(Debug, Clone)]
pub struct BackupRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: BackupMode,
    pub dry_run: bool,
}

/// Engine behaviour not tied to a single request
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Create the snapshot directory and its log during dry runs
    pub snapshot_in_dry_run: bool,
    /// Follow symbolic links while walking the source tree
    pub follow_links: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            snapshot_in_dry_run: true,
            follow_links: false,
        }
    }
}

/// A file that could not be copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub relative_path: PathBuf,
    pub reason: String,
}

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub timestamp: String,
    pub requested_mode: BackupMode,
    /// Full when an incremental run found no baseline
    pub effective_mode: BackupMode,
    pub dry_run: bool,
    pub snapshot: Option<PathBuf>,
    pub baseline: Option<PathBuf>,
    pub total: usize,
    /// Copied, or would be copied in a dry run
    pub copied: usize,
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
    pub log: RunLog,
    pub log_path: Option<PathBuf>,
    pub log_error: Option<String>,
}

impl RunSummary {
    /// Every observed file is either copied or skipped
    pub fn is_consistent(&self) -> bool {
        self.total == self.copied + self.skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Backup Summary ---")?;
        writeln!(f, "Total files in source: {}", self.total)?;
        writeln!(
            f,
            "Files {}copied: {}",
            if self.dry_run { "would be " } else { "" },
            self.copied
        )?;
        writeln!(f, "Files skipped: {}", self.skipped)?;
        write!(f, "----------------------")
    }
}

/// Sequential full/incremental backup into timestamped snapshots
pub struct BackupEngine<C: Copier = FsCopier> {
    policy: Box<dyn DiffPolicy>,
    executor: CopyExecutor<C>,
    options: EngineOptions,
}

impl BackupEngine<FsCopier> {
    /// Engine with the size policy and a timestamp-preserving copier
    pub fn new() -> Self {
        Self::with_copier(FsCopier::default())
    }
}

impl Default for BackupEngine<FsCopier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Copier> BackupEngine<C> {
    pub fn with_copier(copier: C) -> Self {
        Self {
            policy: Box::new(SizePolicy),
            executor: CopyExecutor::new(copier),
            options: EngineOptions::default(),
        }
    }

    /// Replace the identity check used in incremental mode
    pub fn with_policy(mut self, policy: Box<dyn DiffPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Run a backup stamped with the current local time
    pub fn run(&self, request: &BackupRequest, progress: &dyn Progress) -> Result<RunSummary> {
        self.run_at(request, Local::now().naive_local(), progress)
    }

    /// Run a backup whose snapshot is named after `started`
    pub fn run_at(
        &self,
        request: &BackupRequest,
        started: NaiveDateTime,
        progress: &dyn Progress,
    ) -> Result<RunSummary> {
        validate_paths(request)?;

        let timestamp = snapshot_name(started);
        let store = SnapshotStore::new(&request.destination);
        let mut run = RunState::new(request, timestamp.clone(), progress);

        info!(
            source = %request.source.display(),
            destination = %request.destination.display(),
            mode = %request.mode,
            dry_run = request.dry_run,
            "Starting backup"
        );

        let snapshot = if !request.dry_run || self.options.snapshot_in_dry_run {
            let snapshot = store.create(started)?;
            run.note(format!(
                "Created new backup directory: '{}'",
                snapshot.path.display()
            ));
            Some(snapshot)
        } else {
            None
        };
        let snapshot_path = store.snapshot_path(started);

        let baseline = match request.mode {
            BackupMode::Full => None,
            BackupMode::Incremental => {
                adopt_baseline(store.latest_baseline(Some(&timestamp)), &mut run)
            }
        };
        if baseline.is_none() {
            run.effective_mode = BackupMode::Full;
        }

        let walker = WalkDir::new(&request.source)
            .follow_links(self.options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.path() != snapshot_path.as_path());

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    warn!(path = %path, error = %e, "Could not read source entry");
                    run.warn(format!("Could not read '{}': {}", path, e));
                    continue;
                }
            };
            let size = if entry.file_type().is_file() {
                entry.metadata().ok().map(|m| m.len())
            } else if entry.path_is_symlink() {
                // A link to a file is backed up as the file it points to
                match fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => Some(target.len()),
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(path = %entry.path().display(), error = %e, "Could not resolve link");
                        run.warn(format!("Could not read '{}': {}", entry.path().display(), e));
                        continue;
                    }
                }
            } else {
                continue;
            };

            let relative_path = match entry.path().strip_prefix(&request.source) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => continue,
            };
            let file = TrackedFile {
                relative_path,
                source_path: entry.path().to_path_buf(),
                size,
            };

            self.process_file(&file, baseline.as_ref(), &snapshot_path, &mut run);
        }

        let (log_path, log_error) = match &snapshot {
            Some(snapshot) => run.write_log(&snapshot.path.join(LOG_FILE_NAME)),
            None => (None, None),
        };

        info!(
            total = run.total,
            copied = run.copied,
            skipped = run.skipped,
            "Backup finished"
        );

        Ok(RunSummary {
            timestamp,
            requested_mode: request.mode,
            effective_mode: run.effective_mode,
            dry_run: request.dry_run,
            snapshot: snapshot.map(|s| s.path),
            baseline: baseline.map(|b| b.path),
            total: run.total,
            copied: run.copied,
            skipped: run.skipped,
            failures: run.failures,
            log: run.log,
            log_path,
            log_error,
        })
    }

    fn process_file(
        &self,
        file: &TrackedFile,
        baseline: Option<&Snapshot>,
        snapshot_path: &Path,
        run: &mut RunState<'_>,
    ) {
        let relative = file.relative_path.display();
        run.total += 1;

        let decision = decide(self.policy.as_ref(), run.effective_mode, file, baseline);
        debug!(path = %relative, decision = ?decision, "Diff decision");

        match decision {
            Decision::Skip => {
                run.note(format!("Skipped identical file: '{}'", relative));
                run.skipped += 1;
                return;
            }
            Decision::Copy(CopyReason::Updated) => {
                run.note(format!("Found updated file: '{}'", relative));
            }
            Decision::Copy(CopyReason::CompareFailed(reason)) => {
                warn!(path = %relative, reason = %reason, "Comparison failed, copying anyway");
                run.warn(format!(
                    "Error checking file {} for '{}': {}. Copying anyway.",
                    self.policy.name(),
                    relative,
                    reason
                ));
            }
            Decision::Copy(CopyReason::NewFile | CopyReason::Unconditional) => {}
        }

        let destination = snapshot_path.join(&file.relative_path);
        match self
            .executor
            .copy_one(&file.source_path, &destination, run.dry_run)
        {
            CopyOutcome::Copied { bytes } => {
                debug!(path = %relative, bytes, "Copied file");
                run.note(format!("Copied: '{}'", relative));
                run.copied += 1;
            }
            CopyOutcome::WouldCopy => {
                run.note(format!("(Dry Run) Would copy: '{}'", relative));
                run.copied += 1;
            }
            CopyOutcome::SkippedSameFile => {
                warn!(path = %relative, "Source and destination are the same file");
                run.warn(format!(
                    "Warning: Skipped '{}' because it already exists in the destination.",
                    relative
                ));
                run.skipped += 1;
            }
            CopyOutcome::Failed(failure) => {
                warn!(path = %relative, reason = %failure, "Copy failed");
                let message = match &failure {
                    CopyFailure::PermissionDenied(_) => {
                        format!("Permission denied. Skipped: '{}'", relative)
                    }
                    CopyFailure::CreateDir { .. } => format!(
                        "Could not create directory. Skipped: '{}' due to error: {}",
                        relative, failure
                    ),
                    CopyFailure::Io(_) => format!(
                        "Unexpected error. Skipped: '{}' due to error: {}",
                        relative, failure
                    ),
                };
                run.warn(message);
                run.failures.push(FileFailure {
                    relative_path: file.relative_path.clone(),
                    reason: failure.to_string(),
                });
                run.skipped += 1;
            }
        }
    }
}

/// Source and destination must both be existing directories
fn validate_paths(request: &BackupRequest) -> Result<()> {
    if !request.source.is_dir() {
        return Err(Error::InvalidSource {
            path: request.source.clone(),
        });
    }
    if !request.destination.is_dir() {
        return Err(Error::InvalidDestination {
            path: request.destination.clone(),
        });
    }
    Ok(())
}

/// Turn the baseline lookup into the run's baseline.
///
/// A lookup failure is reported and the run continues as a full backup.
fn adopt_baseline(lookup: Result<Option<Snapshot>>, run: &mut RunState<'_>) -> Option<Snapshot> {
    match lookup {
        Ok(Some(baseline)) => {
            run.note(format!(
                "Performing incremental backup against: '{}'",
                baseline.path.display()
            ));
            Some(baseline)
        }
        Ok(None) => {
            run.note("No previous backups found. Performing a full backup.".to_string());
            None
        }
        Err(e) => {
            error!(error = %e, "Could not find latest backup");
            run.warn(format!("Could not find latest backup folder: {}", e));
            run.note("No previous backups found. Performing a full backup.".to_string());
            None
        }
    }
}

/// Mutable record of a run in progress
struct RunState<'a> {
    header: LogHeader,
    dry_run: bool,
    effective_mode: BackupMode,
    total: usize,
    copied: usize,
    skipped: usize,
    failures: Vec<FileFailure>,
    log: RunLog,
    progress: &'a dyn Progress,
}

impl<'a> RunState<'a> {
    fn new(request: &BackupRequest, timestamp: String, progress: &'a dyn Progress) -> Self {
        Self {
            header: LogHeader {
                timestamp,
                source: request.source.clone(),
                destination: request.destination.clone(),
                mode: request.mode,
                dry_run: request.dry_run,
            },
            dry_run: request.dry_run,
            effective_mode: request.mode,
            total: 0,
            copied: 0,
            skipped: 0,
            failures: Vec::new(),
            log: RunLog::new(),
            progress,
        }
    }

    fn note(&mut self, message: String) {
        self.progress.info(&message);
        self.log.append(message);
    }

    fn warn(&mut self, message: String) {
        self.progress.warn(&message);
        self.log.append(message);
    }

    fn write_log(&self, log_path: &Path) -> (Option<PathBuf>, Option<String>) {
        match self.log.flush(log_path, &self.header) {
            Ok(()) => {
                info!(path = %log_path.display(), "Backup log saved");
                (Some(log_path.to_path_buf()), None)
            }
            Err(e) => {
                error!(path = %log_path.display(), error = %e, "Could not write backup log");
                self.progress
                    .warn(&format!("Error: Could not write backup log file: {}", e));
                (None, Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::progress::SilentProgress;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::io;
    use tempfile::TempDir;

    fn at(day: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, second)
            .unwrap()
    }

    struct Fixture {
        _temp_dir: TempDir,
        source: PathBuf,
        destination: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("source");
            let destination = temp_dir.path().join("backups");
            fs::create_dir_all(source.join("docs")).unwrap();
            fs::create_dir_all(&destination).unwrap();
            fs::write(source.join("a.txt"), b"alpha").unwrap();
            fs::write(source.join("docs/b.txt"), b"bravo").unwrap();
            fs::write(source.join("docs/c.txt"), b"charlie").unwrap();
            Self {
                _temp_dir: temp_dir,
                source,
                destination,
            }
        }

        fn request(&self, mode: BackupMode, dry_run: bool) -> BackupRequest {
            BackupRequest {
                source: self.source.clone(),
                destination: self.destination.clone(),
                mode,
                dry_run,
            }
        }
    }

    fn run(engine: &BackupEngine<impl Copier>, request: &BackupRequest, started: NaiveDateTime) -> RunSummary {
        engine.run_at(request, started, &SilentProgress).unwrap()
    }

    #[test]
    fn test_first_incremental_run_degrades_to_full() {
        let fx = Fixture::new();
        let engine = BackupEngine::new();

        let summary = run(&engine, &fx.request(BackupMode::Incremental, false), at(1, 0));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.copied, 3);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.effective_mode, BackupMode::Full);
        assert!(summary.baseline.is_none());
        assert!(summary
            .log
            .lines()
            .iter()
            .any(|l| l == "No previous backups found. Performing a full backup."));

        let snapshot = fx.destination.join("2024-03-01_12-00-00");
        assert_eq!(fs::read(snapshot.join("docs/c.txt")).unwrap(), b"charlie");
        assert_eq!(summary.log_path, Some(snapshot.join(LOG_FILE_NAME)));
    }

    #[test]
    fn test_incremental_skips_same_size_files() {
        let fx = Fixture::new();
        let engine = BackupEngine::new();
        run(&engine, &fx.request(BackupMode::Full, false), at(1, 0));

        // Same size, different content: still treated as identical
        fs::write(fx.source.join("a.txt"), b"ALPHA").unwrap();
        fs::write(fx.source.join("docs/b.txt"), b"bravo, longer").unwrap();
        fs::write(fx.source.join("docs/new.txt"), b"new").unwrap();

        let summary = run(&engine, &fx.request(BackupMode::Incremental, false), at(2, 0));

        assert_eq!(summary.baseline, Some(fx.destination.join("2024-03-01_12-00-00")));
        assert_eq!(summary.effective_mode, BackupMode::Incremental);
        assert_eq!((summary.total, summary.copied, summary.skipped), (4, 2, 2));
        assert!(summary.is_consistent());

        let snapshot = fx.destination.join("2024-03-02_12-00-00");
        assert!(!snapshot.join("a.txt").exists());
        assert!(!snapshot.join("docs/c.txt").exists());
        assert!(snapshot.join("docs/b.txt").exists());
        assert!(snapshot.join("docs/new.txt").exists());

        let lines = summary.log.lines();
        assert!(lines.contains(&"Skipped identical file: 'a.txt'".to_string()));
        assert!(lines.contains(&format!(
            "Found updated file: '{}'",
            Path::new("docs").join("b.txt").display()
        )));
    }

    #[test]
    fn test_full_mode_ignores_baseline() {
        let fx = Fixture::new();
        let engine = BackupEngine::new();
        run(&engine, &fx.request(BackupMode::Full, false), at(1, 0));

        let summary = run(&engine, &fx.request(BackupMode::Full, false), at(2, 0));

        assert_eq!((summary.total, summary.copied, summary.skipped), (3, 3, 0));
        assert!(summary.baseline.is_none());
    }

    #[test]
    fn test_dry_run_leaves_only_snapshot_and_log() {
        let fx = Fixture::new();
        let engine = BackupEngine::new();

        let summary = run(&engine, &fx.request(BackupMode::Full, true), at(1, 0));

        assert_eq!((summary.total, summary.copied, summary.skipped), (3, 3, 0));
        let snapshot = fx.destination.join("2024-03-01_12-00-00");
        let entries: Vec<_> = fs::read_dir(&snapshot)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(LOG_FILE_NAME)]);

        let (header, log) = RunLog::read(&snapshot.join(LOG_FILE_NAME)).unwrap();
        assert!(header.dry_run);
        assert!(log.lines().contains(&"(Dry Run) Would copy: 'a.txt'".to_string()));
    }

    #[test]
    fn test_dry_run_does_not_change_later_decisions() {
        let fx = Fixture::new();
        let engine = BackupEngine::new();
        run(&engine, &fx.request(BackupMode::Full, false), at(1, 0));
        fs::write(fx.source.join("a.txt"), b"alpha, edited").unwrap();

        let dry = run(&engine, &fx.request(BackupMode::Incremental, true), at(2, 0));
        let real = run(&engine, &fx.request(BackupMode::Incremental, false), at(3, 0));

        let base = fx.destination.join("2024-03-01_12-00-00");
        assert_eq!(dry.baseline, Some(base.clone()));
        assert_eq!(real.baseline, Some(base));
        assert_eq!((dry.copied, dry.skipped), (real.copied, real.skipped));
        assert_eq!((real.copied, real.skipped), (1, 2));
    }

    #[test]
    fn test_strict_dry_run_touches_nothing() {
        let fx = Fixture::new();
        let engine = BackupEngine::new().with_options(EngineOptions {
            snapshot_in_dry_run: false,
            ..EngineOptions::default()
        });

        let summary = run(&engine, &fx.request(BackupMode::Incremental, true), at(1, 0));

        assert_eq!(summary.copied, 3);
        assert!(summary.snapshot.is_none());
        assert!(summary.log_path.is_none());
        assert_eq!(fs::read_dir(&fx.destination).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_paths_abort_without_side_effects() {
        let fx = Fixture::new();
        let engine = BackupEngine::new();

        let mut request = fx.request(BackupMode::Full, false);
        request.source = fx.source.join("missing");
        assert!(matches!(
            engine.run_at(&request, at(1, 0), &SilentProgress),
            Err(Error::InvalidSource { .. })
        ));

        let mut request = fx.request(BackupMode::Full, false);
        request.destination = fx.source.join("a.txt");
        assert!(matches!(
            engine.run_at(&request, at(1, 0), &SilentProgress),
            Err(Error::InvalidDestination { .. })
        ));

        assert_eq!(fs::read_dir(&fx.destination).unwrap().count(), 0);
    }

    #[test]
    fn test_same_second_run_is_rejected() {
        let fx = Fixture::new();
        let engine = BackupEngine::new();
        run(&engine, &fx.request(BackupMode::Full, false), at(1, 0));

        let again = engine.run_at(&fx.request(BackupMode::Full, false), at(1, 0), &SilentProgress);
        match again {
            Err(e @ Error::SnapshotExists { .. }) => assert!(e.to_string().contains("retry")),
            other => panic!("unexpected result: {:?}", other.map(|s| s.timestamp)),
        }
    }

    #[test]
    fn test_baseline_lookup_failure_falls_back_to_full() {
        let fx = Fixture::new();
        let request = fx.request(BackupMode::Incremental, false);
        let mut state = RunState::new(&request, "2024-03-01_12-00-00".to_string(), &SilentProgress);

        let lookup = Err(Error::SnapshotListing {
            path: fx.destination.clone(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert!(adopt_baseline(lookup, &mut state).is_none());

        let lines = state.log.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Could not find latest backup folder: "));
        assert_eq!(lines[1], "No previous backups found. Performing a full backup.");
    }

    #[test]
    fn test_log_write_failure_keeps_counts() {
        let fx = Fixture::new();
        // Copying this file leaves a directory where the log has to go
        fs::create_dir_all(fx.source.join(LOG_FILE_NAME)).unwrap();
        fs::write(fx.source.join(LOG_FILE_NAME).join("inner.txt"), b"inner").unwrap();

        let summary = run(&BackupEngine::new(), &fx.request(BackupMode::Full, false), at(1, 0));

        assert_eq!((summary.total, summary.copied, summary.skipped), (4, 4, 0));
        assert!(summary.is_consistent());
        assert!(summary.log_path.is_none());
        assert!(summary.log_error.is_some());
        assert!(fx
            .destination
            .join("2024-03-01_12-00-00")
            .join(LOG_FILE_NAME)
            .join("inner.txt")
            .is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_backed_up_as_its_target() {
        let fx = Fixture::new();
        let outside = fx.source.parent().unwrap().join("outside.txt");
        fs::write(&outside, b"outside").unwrap();
        std::os::unix::fs::symlink(&outside, fx.source.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(fx.source.join("missing.txt"), fx.source.join("dangling.txt"))
            .unwrap();

        let summary = run(&BackupEngine::new(), &fx.request(BackupMode::Full, false), at(1, 0));

        assert_eq!((summary.total, summary.copied, summary.skipped), (4, 4, 0));
        let copied = fx.destination.join("2024-03-01_12-00-00").join("link.txt");
        assert!(fs::symlink_metadata(&copied).unwrap().file_type().is_file());
        assert_eq!(fs::read(&copied).unwrap(), b"outside");
        assert!(summary
            .log
            .lines()
            .iter()
            .any(|l| l.starts_with("Could not read ") && l.contains("dangling.txt")));

        // Unchanged link target is skipped on the next incremental run
        let next = run(&BackupEngine::new(), &fx.request(BackupMode::Incremental, false), at(2, 0));
        assert_eq!((next.total, next.copied, next.skipped), (4, 0, 4));
    }

    /// Copier that denies access to one file
    struct DenyOne(&'static str);

    impl Copier for DenyOne {
        fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
            fs::create_dir_all(dir)
        }

        fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
            if from.file_name().and_then(|n| n.to_str()) == Some(self.0) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            fs::copy(from, to)
        }
    }

    #[test]
    fn test_one_permission_failure_among_ten() {
        let fx = Fixture::new();
        fs::remove_dir_all(&fx.source).unwrap();
        fs::create_dir_all(&fx.source).unwrap();
        for i in 0..10 {
            fs::write(fx.source.join(format!("file{}.txt", i)), format!("content {}", i)).unwrap();
        }

        let engine = BackupEngine::with_copier(DenyOne("file4.txt"));
        let summary = run(&engine, &fx.request(BackupMode::Full, false), at(1, 0));

        assert_eq!((summary.total, summary.copied, summary.skipped), (10, 9, 1));
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].relative_path, PathBuf::from("file4.txt"));
        assert!(summary.failures[0].reason.starts_with("permission denied"));
        assert!(summary
            .log
            .lines()
            .contains(&"Permission denied. Skipped: 'file4.txt'".to_string()));

        let snapshot = fx.destination.join("2024-03-01_12-00-00");
        for i in (0..10).filter(|i| *i != 4) {
            assert!(snapshot.join(format!("file{}.txt", i)).exists());
        }
        assert!(!snapshot.join("file4.txt").exists());
        assert!(snapshot.join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_destination_inside_source_is_not_copied_into_itself() {
        let fx = Fixture::new();
        let destination = fx.source.join("backups");
        fs::create_dir_all(&destination).unwrap();

        let request = BackupRequest {
            source: fx.source.clone(),
            destination: destination.clone(),
            mode: BackupMode::Full,
            dry_run: false,
        };
        let summary = run(&BackupEngine::new(), &request, at(1, 0));

        assert_eq!(summary.total, 3);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_summary_block() {
        let fx = Fixture::new();
        let summary = run(&BackupEngine::new(), &fx.request(BackupMode::Full, true), at(1, 0));

        assert_eq!(
            summary.to_string(),
            "--- Backup Summary ---\n\
             Total files in source: 3\n\
             Files would be copied: 3\n\
             Files skipped: 0\n\
             ----------------------"
        );
    }
}
