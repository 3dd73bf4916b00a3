use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_DIR: &str = "typing-vibes";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("folder path must not be empty")]
    EmptyFolder,
    #[error("minimum lines must be at least 1")]
    MinLinesTooSmall,
    #[error("maximum lines ({max}) must not be below minimum lines ({min})")]
    MaxBelowMin { min: usize, max: usize },
    #[error("{field}: '{value}' is not a whole number")]
    NotANumber { field: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_folder_path")]
    pub folder_path: String,
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Seconds; 0 means no limit.
    #[serde(default = "default_max_time_limit")]
    pub max_time_limit: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub break_ligatures: bool,
}

fn default_folder_path() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("code")
        .to_string_lossy()
        .to_string()
}
fn default_min_lines() -> usize {
    5
}
fn default_max_lines() -> usize {
    50
}
fn default_max_time_limit() -> u64 {
    30
}
fn default_theme() -> String {
    "vibes".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder_path: default_folder_path(),
            min_lines: default_min_lines(),
            max_lines: default_max_lines(),
            max_time_limit: default_max_time_limit(),
            theme: default_theme(),
            break_ligatures: false,
        }
    }
}

/// Line-count bounds handed to the excerpt provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub min_lines: usize,
    pub max_lines: usize,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            min_lines: self.min_lines,
            max_lines: self.max_lines,
        }
    }

    /// `folder_path` with a leading `~` expanded to the home directory.
    pub fn folder(&self) -> PathBuf {
        expand_home(&self.folder_path)
    }

    pub fn set_folder_path(&mut self, path: &str) -> Result<(), ConfigError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(ConfigError::EmptyFolder);
        }
        self.folder_path = path.to_string();
        Ok(())
    }

    /// Set both bounds at once so an edit that raises the minimum past the old
    /// maximum (or the reverse) is judged against the new pair.
    pub fn set_line_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        if min == 0 {
            return Err(ConfigError::MinLinesTooSmall);
        }
        if max < min {
            return Err(ConfigError::MaxBelowMin { min, max });
        }
        self.min_lines = min;
        self.max_lines = max;
        Ok(())
    }

    pub fn set_min_lines(&mut self, min: usize) -> Result<(), ConfigError> {
        self.set_line_bounds(min, self.max_lines)
    }

    pub fn set_max_lines(&mut self, max: usize) -> Result<(), ConfigError> {
        self.set_line_bounds(self.min_lines, max)
    }

    pub fn set_max_time_limit(&mut self, secs: u64) {
        self.max_time_limit = secs;
    }

    /// Re-check values that may have come from a hand-edited file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut probe = self.clone();
        probe.set_folder_path(&self.folder_path)?;
        probe.set_line_bounds(self.min_lines, self.max_lines)
    }
}

pub fn parse_count(field: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        field,
        value: value.to_string(),
    })
}

pub fn parse_secs(field: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        field,
        value: value.to_string(),
    })
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}
