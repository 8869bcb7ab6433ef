//! Operator-facing progress output for a running backup.

/// Receives one line per action while a run is in progress
pub trait Progress {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Progress on stdout, diagnostics on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn info(&self, message: &str) {
        println!("  > {}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("  > {}", message);
    }
}

/// Discards progress; used by tests and embedders
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}
