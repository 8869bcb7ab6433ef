//! User configuration loaded from a TOML file.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Command-line flags override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backup::{CompareMode, EngineOptions};
use crate::logging::{LogFormat, LOG_LEVELS};
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backup: BackupConfig,
    pub dry_run: DryRunConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// How incremental runs decide that a file is unchanged
    pub compare: CompareMode,
    pub preserve_timestamps: bool,
    pub follow_links: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DryRunConfig {
    /// Create the snapshot directory and its log during dry runs
    pub create_snapshot: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            compare: CompareMode::Size,
            preserve_timestamps: true,
            follow_links: false,
        }
    }
}

impl Default for DryRunConfig {
    fn default() -> Self {
        Self {
            create_snapshot: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load from `path` if given (it must exist), otherwise from the default
    /// location, falling back to defaults when no file is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| Error::Configuration {
            reason: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `<config_dir>/nova-snap/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nova-snap").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::Configuration {
                reason: format!(
                    "Unknown log level '{}' (expected one of: {})",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            snapshot_in_dry_run: self.dry_run.create_snapshot,
            follow_links: self.backup.follow_links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backup.compare, CompareMode::Size);
        assert!(config.backup.preserve_timestamps);
        assert!(config.dry_run.create_snapshot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            [backup]
            compare = "content"

            [dry_run]
            create_snapshot = false
            "#,
        )
        .unwrap();

        assert_eq!(config.backup.compare, CompareMode::Content);
        assert!(config.backup.preserve_timestamps);
        assert_eq!(config.logging, LoggingConfig::default());

        let options = config.engine_options();
        assert!(!options.snapshot_in_dry_run);
        assert!(!options.follow_links);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Config::parse("[backup]\ncompare = \"hash\"\n"),
            Err(Error::TomlParse(_))
        ));

        let config = Config::parse("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("config.toml");
        assert!(Config::load(Some(&missing)).is_err());

        fs::write(&missing, "[logging]\nformat = \"json\"\n").unwrap();
        let config = Config::load(Some(&missing)).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
