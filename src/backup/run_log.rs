//! Human-readable action log written into each snapshot.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use super::types::BackupMode;
use crate::{Error, Result};

/// File name of the log inside a snapshot directory
pub const LOG_FILE_NAME: &str = "backup_log.txt";

const ACTIONS_MARKER: &str = "--- Actions ---";
const HEADER_LINES: usize = 5;

/// Header block describing a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHeader {
    pub timestamp: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: BackupMode,
    pub dry_run: bool,
}

impl LogHeader {
    pub fn render(&self) -> String {
        format!(
            "Backup Log: {}\nSource: {}\nDestination: {}\nBackup Type: {}\nDry Run: {}\n",
            self.timestamp,
            self.source.display(),
            self.destination.display(),
            self.mode.label(),
            if self.dry_run { "Yes" } else { "No" },
        )
    }

    /// Parse the header block at the top of a log file
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let mut field = |prefix: &str| -> Result<String> {
            lines
                .next()
                .and_then(|line| line.strip_prefix(prefix))
                .map(str::to_owned)
                .ok_or_else(|| Error::InvalidLog {
                    reason: format!("missing '{}' line", prefix.trim_end()),
                })
        };

        let timestamp = field("Backup Log: ")?;
        let source = PathBuf::from(field("Source: ")?);
        let destination = PathBuf::from(field("Destination: ")?);
        let mode_label = field("Backup Type: ")?;
        let dry_run_label = field("Dry Run: ")?;

        let mode = BackupMode::from_label(&mode_label).ok_or_else(|| Error::InvalidLog {
            reason: format!("unknown backup type '{}'", mode_label),
        })?;
        let dry_run = match dry_run_label.as_str() {
            "Yes" => true,
            "No" => false,
            other => {
                return Err(Error::InvalidLog {
                    reason: format!("unknown dry-run flag '{}'", other),
                })
            }
        };

        Ok(Self {
            timestamp,
            source,
            destination,
            mode,
            dry_run,
        })
    }

    /// Read only the header block of the log at `log_path`
    pub fn read_from(log_path: &Path) -> Result<Self> {
        let reader = io::BufReader::new(fs::File::open(log_path)?);
        let mut text = String::new();
        for line in reader.lines().take(HEADER_LINES) {
            text.push_str(&line?);
            text.push('\n');
        }
        Self::parse(&text)
    }
}

/// Ordered action lines accumulated during one run
#[derive(Debug, Default, Clone)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: impl Into<String>) {
        self.lines.push(message.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write the header and every action line to `log_path`
    pub fn flush(&self, log_path: &Path, header: &LogHeader) -> io::Result<()> {
        let mut file = io::BufWriter::new(fs::File::create(log_path)?);
        file.write_all(header.render().as_bytes())?;
        writeln!(file)?;
        writeln!(file, "{}", ACTIONS_MARKER)?;
        for line in &self.lines {
            writeln!(file, "{}", line)?;
        }
        file.flush()
    }

    /// Read a log written by [`RunLog::flush`]
    pub fn read(log_path: &Path) -> Result<(LogHeader, RunLog)> {
        let text = fs::read_to_string(log_path)?;
        let header = LogHeader::parse(&text)?;

        let mut log = RunLog::new();
        let actions = text
            .lines()
            .skip_while(|line| *line != ACTIONS_MARKER)
            .skip(1);
        for line in actions {
            log.append(line);
        }
        Ok((header, log))
    }
}
