//! transcrack configuration
//!
//! Resolution order: built-in defaults, then a YAML file, then `TRANSCRACK_*`
//! environment variables. The CLI applies its own flags last.
//!
//! ```yaml
//! workers: 6
//! max_key_length: 7
//! extension: txt
//! log_root: logs
//! show_plaintext: false
//! priority_keys: ["123", "4321", "1984"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use transcrack_core::{MAX_KEY_LENGTH, MIN_KEY_LENGTH};

pub const ENV_WORKERS: &str = "TRANSCRACK_WORKERS";
pub const ENV_MAX_KEY_LENGTH: &str = "TRANSCRACK_MAX_KEY_LENGTH";
pub const ENV_LOG_ROOT: &str = "TRANSCRACK_LOG_ROOT";
pub const ENV_EXTENSION: &str = "TRANSCRACK_EXTENSION";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Brute-force search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Worker threads in the search pool
    pub workers: usize,
    /// Longest exhaustive key length (2-9)
    pub max_key_length: u8,
    /// Extension of ciphertext files, without the dot
    pub extension: String,
    /// Root directory for run logs and artifacts
    pub log_root: PathBuf,
    /// Replaces the built-in priority key list when set
    pub priority_keys: Option<Vec<String>>,
    /// Print decrypted text to the terminal on success
    pub show_plaintext: bool,
    /// Mirror log lines to the terminal
    pub echo: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            max_key_length: 6,
            extension: "txt".to_string(),
            log_root: PathBuf::from("logs"),
            priority_keys: None,
            show_plaintext: true,
            echo: true,
        }
    }
}

/// Leave two cores to the rest of the system, but always run at least one worker.
pub fn default_workers() -> usize {
    num_cpus::get().saturating_sub(2).max(1)
}

/// `~/.config/transcrack/config.yaml`, when a config dir exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("transcrack").join("config.yaml"))
}

impl SearchConfig {
    /// Load from an explicit file, or from the default location when present,
    /// then overlay the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.overlay(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply `TRANSCRACK_*` overrides read through `lookup`.
    pub fn overlay<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_WORKERS) {
            self.workers = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{ENV_WORKERS}={raw} is not a number")))?;
        }
        if let Some(raw) = lookup(ENV_MAX_KEY_LENGTH) {
            self.max_key_length = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_MAX_KEY_LENGTH}={raw} is not a number"))
            })?;
        }
        if let Some(raw) = lookup(ENV_LOG_ROOT) {
            self.log_root = PathBuf::from(raw);
        }
        if let Some(raw) = lookup(ENV_EXTENSION) {
            self.extension = raw.trim().trim_start_matches('.').to_string();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        check_key_length(self.max_key_length)?;
        if self.extension.is_empty() {
            return Err(ConfigError::Invalid("extension must not be empty".into()));
        }
        if let Some(keys) = &self.priority_keys {
            if keys.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::Invalid("priority_keys must not contain empty keys".into()));
            }
        }
        Ok(())
    }
}

/// Key length policy: 0 is excluded by the no-zero digit rule, 9 digits is the ceiling.
pub fn check_key_length(max_key_length: u8) -> Result<()> {
    if !(MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&max_key_length) {
        return Err(ConfigError::Invalid(format!(
            "max_key_length {} must be between {} and {} (0 is not allowed in transposition keys)",
            max_key_length, MIN_KEY_LENGTH, MAX_KEY_LENGTH
        )));
    }
    Ok(())
}
