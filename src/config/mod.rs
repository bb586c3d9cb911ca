// Configuration management for the song skipper CLI
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::host::settings::{REGEX_ENABLED, SKIPPED_ARTISTS, SKIPPED_SONGS, SKIP_TARGET};
use crate::host::SettingsStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Same keys the host settings store uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default)]
    pub regex_enabled: bool,
    pub skip_target: Option<String>,
    pub skipped_artists: Option<String>,
    pub skipped_songs: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_prefix: "song-skipper.log".to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("song-skipper");

        Ok(config_dir.join("config.toml"))
    }
}

impl SettingsStore for Config {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            REGEX_ENABLED => Some(self.filter.regex_enabled),
            _ => None,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match key {
            SKIP_TARGET => self.filter.skip_target.clone(),
            SKIPPED_ARTISTS => self.filter.skipped_artists.clone(),
            SKIPPED_SONGS => self.filter.skipped_songs.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SkipTarget;
    use crate::host::filter_configuration;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.filter.skip_target = Some("Skip".to_string());
        config.filter.skipped_artists = Some("Drake, Future".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.filter, config.filter);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[filter]\nskipped_artists = \"Drake\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.filter.regex_enabled);
        assert_eq!(loaded.filter.skip_target, None);
        assert_eq!(loaded.logging.file_prefix, "song-skipper.log");
    }

    #[test]
    fn test_config_acts_as_settings_store() {
        let mut config = Config::default();
        config.filter.regex_enabled = true;
        config.filter.skip_target = Some("Remove".to_string());
        config.filter.skipped_songs = Some("Intro".to_string());

        let snapshot = filter_configuration(&config);
        assert!(snapshot.regex_enabled);
        assert_eq!(snapshot.skip_target, Some(SkipTarget::RemoveFromPlaylist));
        assert_eq!(snapshot.skipped_artists, None);
        assert_eq!(snapshot.skipped_songs.as_deref(), Some("Intro"));
    }

    #[test]
    fn test_unreadable_file_reports_path() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
