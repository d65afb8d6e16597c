//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/quotebook/config.toml)
//! 3. Environment variables (QUOTEBOOK_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
const ENV_PREFIX: &str = "QUOTEBOOK";

/// Mock endpoint used until a real one is configured
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (storage.json, debug.log)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Remote quote endpoint (GET for fetch, POST for push)
    #[serde(default = "default_remote_url")]
    pub remote_url: String,

    /// Whether periodic and automatic sync is enabled
    #[serde(default = "default_true")]
    pub sync_enabled: bool,

    /// Seconds between sync cycles in the shell
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,

    /// How many remote records are considered per cycle
    #[serde(default = "default_fetch_limit")]
    pub remote_fetch_limit: usize,

    /// Category given to quotes that came from the remote
    #[serde(default = "default_remote_category")]
    pub remote_category: String,

    /// Whether manually added quotes are pushed to the remote
    #[serde(default = "default_true")]
    pub push_enabled: bool,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Log file (defaults to {data_dir}/debug.log when logging is on)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            remote_url: default_remote_url(),
            sync_enabled: true,
            sync_interval_secs: default_sync_interval(),
            remote_fetch_limit: default_fetch_limit(),
            remote_category: default_remote_category(),
            push_enabled: true,
            request_timeout_secs: default_request_timeout(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (QUOTEBOOK_DATA_DIR, QUOTEBOOK_REMOTE_URL, ...)
    /// 2. Config file (~/.config/quotebook/config.toml or QUOTEBOOK_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string
    #[cfg(test)]
    pub(crate) fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // QUOTEBOOK_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // QUOTEBOOK_REMOTE_URL (empty keeps the current value)
        if let Ok(val) = std::env::var(format!("{}_REMOTE_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.remote_url = val;
            }
        }

        // QUOTEBOOK_SYNC_ENABLED
        if let Ok(val) = std::env::var(format!("{}_SYNC_ENABLED", ENV_PREFIX)) {
            self.sync_enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // QUOTEBOOK_SYNC_INTERVAL
        if let Ok(val) = std::env::var(format!("{}_SYNC_INTERVAL", ENV_PREFIX)) {
            if let Ok(secs) = val.parse::<u64>() {
                if secs > 0 {
                    self.sync_interval_secs = secs;
                }
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with QUOTEBOOK_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quotebook")
            .join("config.toml")
    }

    /// Get the path to the persistent storage file
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }

    /// Interval between sync cycles
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }

    /// HTTP request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebook")
}

fn default_remote_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_sync_interval() -> u64 {
    60
}

fn default_fetch_limit() -> usize {
    5
}

fn default_remote_category() -> String {
    "Server".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
