//! Persistent configuration for the wgt toolkit
//!
//! The configuration file is a small TOML document. Its location is resolved
//! in this order:
//! - the `WGT_CONFIG` environment variable, when set and non-empty
//! - a pointer file `.wgt_config_path` next to the default location
//! - `~/.config/wgt/wgt.toml` (`%APPDATA%\wgt\wgt.toml` on Windows)

pub mod paths;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use paths::{default_library_dir, default_resources_dir, TEMPLATE_SUBDIR, WRAPPER_SUBDIR};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "WGT_CONFIG";

/// Name of the pointer file stored next to the default config file
pub const POINTER_FILE: &str = ".wgt_config_path";

/// Keys accepted by [`Config::set`]
pub const KNOWN_KEYS: &[&str] = &["resources-path", "library-path", "locale"];

/// Error type for config loading and saving
#[derive(Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    Io(std::io::Error),
    /// The config file is not valid TOML for [`Config`]
    Parse(toml::de::Error),
    /// The config could not be serialized
    Serialize(toml::ser::Error),
    /// No home / config directory could be determined
    NoConfigDir,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Application resources directory (holds `etc/npapi-wrapper*` templates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_path: Option<String>,
    /// Directory receiving generated wrapper packages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_path: Option<String>,
    /// Locale used to pick localized widget names, e.g. `fr_FR`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Config {
    pub fn path() -> PathBuf {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        let Some(default) = default_config_path() else {
            return PathBuf::from("wgt.toml");
        };

        if let Some(parent) = default.parent() {
            let pointer = parent.join(POINTER_FILE);
            if let Ok(contents) = fs::read_to_string(&pointer) {
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
        }

        default
    }

    /// Path of the pointer file used by `wgt config path <new>`
    pub fn pointer_path() -> Result<PathBuf, ConfigError> {
        default_config_path()
            .and_then(|p| p.parent().map(|parent| parent.join(POINTER_FILE)))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the resolved location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "resources-path" => self.resources_path.clone(),
            "library-path" => self.library_path.clone(),
            "locale" => self.locale.clone(),
            _ => None,
        }
    }

    /// Set a value by key; returns false for unknown keys
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "resources-path" => self.resources_path = Some(value),
            "library-path" => self.library_path = Some(value),
            "locale" => self.locale = Some(value),
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.resources_path.is_none() && self.library_path.is_none() && self.locale.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Resources directory, falling back to the platform data directory
    pub fn resources_dir(&self) -> PathBuf {
        self.resources_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_resources_dir)
    }

    /// Directory where `wgt wrap` places generated packages by default
    pub fn library_dir(&self) -> PathBuf {
        self.library_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_library_dir)
    }
}

fn default_config_path() -> Option<PathBuf> {
    #[cfg(not(target_os = "windows"))]
    let default = dirs::home_dir().map(|h| h.join(".config").join("wgt").join("wgt.toml"));

    #[cfg(target_os = "windows")]
    let default = dirs::config_dir().map(|c| c.join("wgt").join("wgt.toml"));

    default
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_default() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let loaded = Config::load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(loaded.is_ok_and(|c| c.is_empty()));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("nested").join("wgt.toml");

        let mut config = Config::default();
        assert!(config.set("locale", "fr_FR".to_string()));
        assert!(config.set("library-path", "/srv/widgets".to_string()));
        assert!(config.save_to_path(&path).is_ok());

        let content = fs::read_to_string(&path).unwrap_or_default();
        assert!(content.contains("library-path = \"/srv/widgets\""));

        let loaded = Config::load_from_path(&path).unwrap_or_default();
        assert_eq!(loaded, config);
        assert_eq!(loaded.library_dir(), PathBuf::from("/srv/widgets"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut config = Config::default();
        assert!(!config.set("cache-path", "/tmp".to_string()));
        assert!(config.get("cache-path").is_none());
        assert!(config.is_empty());
    }

    #[test]
    fn test_values_iter_follows_key_order() {
        let config = Config {
            resources_path: Some("/opt/wgt".to_string()),
            library_path: None,
            locale: Some("de_DE".to_string()),
        };
        let values = config.values_iter();
        assert_eq!(
            values,
            vec![
                ("resources-path", "/opt/wgt".to_string()),
                ("locale", "de_DE".to_string())
            ]
        );
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("wgt.toml");
        assert!(fs::write(&path, "locale = [").is_ok());
        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
