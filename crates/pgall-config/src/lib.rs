//! Configuration for the pgall CLI.
//!
//! The config lives in `pgall.toml` under the platform config directory and
//! currently holds one setting: the plugins gallery root. Resolution order for
//! the gallery root is CLI flag, then `PGALL_PLUGINS_DIR`, then the config
//! file, then `./plugins`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "PGALL_CONFIG";

/// Name of the environment variable that overrides the plugins directory.
pub const PLUGINS_DIR_ENV: &str = "PGALL_PLUGINS_DIR";

/// Errors that can occur while loading or saving the config file
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
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

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<String>,
}

impl Config {
    pub fn path() -> PathBuf {
        // Honor explicit override via PGALL_CONFIG for tests / isolated runs.
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        // Default config file path (platform-appropriate).
        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pgall")
            .join("pgall.toml");

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pgall")
            .join("pgall.toml");

        default
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "plugins-dir" => self.plugins_dir.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) {
        if key == "plugins-dir" {
            self.plugins_dir = Some(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plugins_dir.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        let mut values = Vec::new();
        if let Some(ref val) = self.plugins_dir {
            values.push(("plugins-dir", val.clone()));
        }
        values
    }

    /// Resolve the plugins gallery root.
    ///
    /// Precedence: explicit CLI flag, `PGALL_PLUGINS_DIR`, the config file,
    /// then `./plugins` relative to the current directory.
    pub fn resolve_plugins_dir(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(dir) = flag {
            return dir.to_path_buf();
        }

        if let Ok(env_dir) = std::env::var(PLUGINS_DIR_ENV) {
            let trimmed = env_dir.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        if let Some(ref dir) = self.plugins_dir {
            return PathBuf::from(dir);
        }

        PathBuf::from("plugins")
    }
}
