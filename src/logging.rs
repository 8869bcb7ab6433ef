//! Diagnostic logging setup.
//!
//! Operator-facing progress goes to stdout through
//! [`crate::backup::Progress`]; tracing events go to stderr.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Output format of tracing events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Levels accepted in the `[logging]` config section
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Filter directive for this crate; `RUST_LOG` takes precedence when set
pub fn filter_directive(level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { level };
    format!("nova_snap={}", level)
}

pub fn init_logging(level: &str, verbose: bool, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level, verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| Error::Configuration {
        reason: format!("Failed to initialise logging: {}", e),
    })
}
