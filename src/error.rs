//! Error types for NovaSnap

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for NovaSnap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Source path '{}' is not a valid directory", path.display())]
    InvalidSource { path: PathBuf },

    #[error("Destination path '{}' is not a valid directory", path.display())]
    InvalidDestination { path: PathBuf },

    #[error("Failed to create snapshot directory '{}': {source}", path.display())]
    SnapshotCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Snapshot directory already exists: {} (another run started within the same second; retry in a moment)",
        path.display()
    )]
    SnapshotExists { path: PathBuf },

    #[error("Could not list snapshots in '{}': {source}", path.display())]
    SnapshotListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid backup log: {reason}")]
    InvalidLog { reason: String },

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },
}

/// Result type alias for NovaSnap operations
pub type Result<T> = std::result::Result<T, Error>;
