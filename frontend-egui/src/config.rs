//! Frontend configuration loaded from an optional TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SWIPED_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "swiped.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON snapshot the summary reads its aggregates from.
    pub stats_path: PathBuf,
    pub fade_in_ms: u64,
    pub max_width: f32,
    pub start_visible: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stats_path: PathBuf::from("swipe_stats.json"),
            fade_in_ms: 500,
            max_width: 450.0,
            start_visible: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AppConfig {
    /// Load from `$SWIPED_CONFIG` or `./swiped.toml`, falling back to defaults.
    pub fn load() -> Self {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        match Self::from_path(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config =
            AppConfig::from_toml_str("fade_in_ms = 0\nstats_path = \"/tmp/s.json\"").unwrap();
        assert_eq!(config.fade_in(), Duration::ZERO);
        assert_eq!(config.stats_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.max_width, 450.0);
        assert!(config.start_visible);
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = AppConfig::from_toml_str("max_width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "start_visible = false\n").unwrap();

        let config = AppConfig::from_path(&path).unwrap();
        assert!(!config.start_visible);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
