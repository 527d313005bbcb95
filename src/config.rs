//! Configuration management for Virtual-Bridge

use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Bridge configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the local launcher service
    pub launcher_url: String,

    /// Directory holding the persisted profile/group/global records
    pub data_dir: String,

    /// Default timeout for dispatched commands in milliseconds
    pub default_timeout_ms: u64,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launcher_url: "http://localhost:9528".to_string(),
            data_dir: default_data_dir(),
            default_timeout_ms: 2000,
            log_level: "info".to_string(),
        }
    }
}

fn default_data_dir() -> String {
    env::var("HOME")
        .map(|home| format!("{}/.virtual-bridge", home))
        .unwrap_or_else(|_| ".virtual-bridge".to_string())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(url) = env::var("VBRIDGE_LAUNCHER_URL") {
            config.launcher_url = url;
        }

        if let Ok(data_dir) = env::var("VBRIDGE_DATA_DIR") {
            config.data_dir = data_dir;
        }

        if let Ok(timeout) = env::var("VBRIDGE_DEFAULT_TIMEOUT_MS") {
            config.default_timeout_ms = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid VBRIDGE_DEFAULT_TIMEOUT_MS"))?;
        }

        if let Ok(log_level) = env::var("VBRIDGE_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }
}
