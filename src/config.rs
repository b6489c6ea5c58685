use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracker_types::TabKind;

use crate::column::MonthTable;

pub const DEFAULT_CONFIG_FILE: &str = "tracker.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Sheet tab names, one per tab kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabNames {
    pub unreleased: String,
    pub released: String,
    pub stems: String,
    pub samples: String,
    pub music_videos: String,
}

impl Default for TabNames {
    fn default() -> Self {
        Self {
            unreleased: "Unreleased".into(),
            released: "Released".into(),
            stems: "Stems".into(),
            samples: "Samples".into(),
            music_videos: "Music Videos".into(),
        }
    }
}

impl TabNames {
    pub fn name_of(&self, kind: TabKind) -> &str {
        match kind {
            TabKind::Unreleased => &self.unreleased,
            TabKind::Released => &self.released,
            TabKind::Stems => &self.stems,
            TabKind::Samples => &self.samples,
            TabKind::MusicVideos => &self.music_videos,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Month abbreviations in calendar order.
    pub months: MonthTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub tabs: TabNames,
    pub dates: DateConfig,
}

impl TrackerConfig {
    /// `Ok(None)` when there is no file at `config_path`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config = Self::from_toml(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.tabs.name_of(TabKind::MusicVideos), "Music Videos");
        assert_eq!(config.dates.months, MonthTable::standard());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TrackerConfig::from_toml("[tabs]\nunreleased = \"Unreleased 2\"\n").unwrap();
        assert_eq!(config.tabs.unreleased, "Unreleased 2");
        assert_eq!(config.tabs.released, "Released");
        assert_eq!(config.dates.months.len(), 12);
    }

    #[test]
    fn test_month_table_override() {
        let config = TrackerConfig::from_toml(
            "[dates]\nmonths = [\"Jan\", \"Feb\", \"Mar\", \"Apr\", \"May\", \"Jun\", \"Jul\", \"AugSep\", \"Oct\", \"Nov\", \"Dec\"]\n",
        )
        .unwrap();
        assert_eq!(config.dates.months, MonthTable::as_recorded());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let loaded = TrackerConfig::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[tabs]\nstems = \"Stems (new)\"\n").unwrap();

        let config = TrackerConfig::load_from_path(&path).unwrap().unwrap();
        assert_eq!(config.tabs.stems, "Stems (new)");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[tabs\n").unwrap();

        let err = TrackerConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }
}
