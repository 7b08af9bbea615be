use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api_client::ApiConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.ataix.kz";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "ATAIX_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Exchange host, paths are appended verbatim
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// JSON file holding `api_key` (defaults to ./Api.json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Title label shown above the buttons
    pub title: String,

    /// Show row numbers in the results table
    pub show_row_numbers: bool,

    /// Upper bound for auto-sized column widths
    pub max_column_width: u16,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            key_file: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "CRYPTO TRADING PLATFORM".to_string(),
            show_row_numbers: false,
            max_column_width: 40,
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            tracing::debug!(target: "config", "No settings file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        tracing::info!(target: "config", "Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("ataix-cli").join("config.toml"))
    }

    /// Build the client configuration around an already resolved key
    pub fn api_config(&self, api_key: String) -> ApiConfig {
        self.api_config_from(std::env::var(API_URL_ENV).ok(), api_key)
    }

    /// `api_config` with the `ATAIX_API_URL` value passed in. Empty means unset.
    pub fn api_config_from(&self, env_url: Option<String>, api_key: String) -> ApiConfig {
        let base_url = env_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.api.base_url.clone());

        ApiConfig {
            base_url,
            api_key,
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# ATAIX CLI Configuration File
# Location: ~/.config/ataix-cli/config.toml (Linux)
#           %APPDATA%\ataix-cli\config.toml (Windows)

[api]
# Exchange host; endpoint paths such as /api/prices are appended to it
# (ATAIX_API_URL overrides this)
base_url = "https://api.ataix.kz"

# Whole-request timeout in seconds
timeout_secs = 15

# JSON file containing {"api_key": "..."}; relative paths resolve against the
# working directory (ATAIX_API_KEY overrides the file)
# key_file = "Api.json"

[display]
# Title label shown above the buttons
title = "CRYPTO TRADING PLATFORM"

# Show row numbers in the results table
show_row_numbers = false

# Upper bound for auto-sized column widths
max_column_width = 40
"#
        .to_string()
    }
}
