//! Configuration
//!
//! Loads settings from a TOML file, then applies environment overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "PRICEPULSE_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where client state and logs are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("PricePulse")
}

impl StorageConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also log to stderr
    #[serde(default)]
    pub console: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load `explicit` if given, else the first config file found, else defaults;
    /// environment overrides are applied on top in every case
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        explicit: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::candidate_paths(&lookup).into_iter().find(|p| p.exists()) {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(lookup);
        Ok(config)
    }

    fn candidate_paths(lookup: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = lookup(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("pricepulse").join("config.toml"));
        }
        paths.push(PathBuf::from("./pricepulse.toml"));
        paths
    }

    /// Apply `PRICEPULSE_*` overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PRICEPULSE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(dir) = lookup("PRICEPULSE_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("PRICEPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PricePulse Configuration
#
# Environment variables override these settings:
# - PRICEPULSE_API_URL
# - PRICEPULSE_DATA_DIR
# - PRICEPULSE_LOG_LEVEL

[api]
# Base URL of the PricePulse backend
base_url = "http://localhost:8000"

# Per-request timeout (seconds)
request_timeout_secs = 30

[storage]
# Directory for the session token and logs
# data_dir = "~/.local/share/PricePulse"

[logging]
# Log level (trace, debug, info, warn, error)
level = "info"

# Mirror logs to stderr
console = false
"#
    .to_string()
}
