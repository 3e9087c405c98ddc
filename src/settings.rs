//! Persisted user settings: the API key, theme and sound preferences.
//!
//! Stored as TOML in the platform config directory. Chat history is never
//! written here.

use crate::models::Credential;
use crate::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Credential,
    pub dark_mode: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: Credential::default(),
            dark_mode: false,
            sound_enabled: true,
        }
    }
}

/// Location of the settings file plus load/save.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `settings.toml` under the platform config directory.
    pub fn default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "gemini-chat", "gemini-chat").ok_or_else(|| {
            Error::Config("Could not determine a config directory for settings".to_string())
        })?;
        Ok(Self::new(dirs.config_dir().join("settings.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings, falling back to defaults when the file does not exist.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            tracing::debug!(
                "No settings file at {}; using defaults",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Write settings atomically: temp file in the same directory, then rename.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let parent = self.path.parent().filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(settings)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file.persist(&self.path)?;

        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));

        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.sound_enabled);
        assert!(!settings.dark_mode);
        assert!(settings.api_key.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.toml"));

        let settings = Settings {
            api_key: Credential::new("abc"),
            dark_mode: true,
            sound_enabled: false,
        };
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "dark_mode = true\n").unwrap();

        let settings = SettingsStore::new(&path).load().unwrap();
        assert!(settings.dark_mode);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "dark_mode = = yes").unwrap();

        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::SettingsParse(_)));
    }

    #[test]
    fn test_saved_file_uses_plain_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        store
            .save(&Settings {
                api_key: Credential::new("k1"),
                ..Settings::default()
            })
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("api_key = \"k1\""));
        assert!(raw.contains("sound_enabled = true"));
    }
}
