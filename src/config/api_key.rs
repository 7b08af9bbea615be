use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Key file looked up relative to the working directory
pub const DEFAULT_KEY_FILE: &str = "Api.json";

/// Environment variable that takes precedence over the key file
pub const API_KEY_ENV: &str = "ATAIX_API_KEY";

/// Read `api_key` from a JSON key file.
///
/// Never fails: a missing, unreadable or malformed file is logged and
/// yields an empty key, so requests go out unauthenticated.
pub fn load_api_key(path: &Path) -> String {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(target: "config", "Config error: cannot read {}: {}", path.display(), e);
            return String::new();
        }
    };

    let parsed: Value = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(target: "config", "Config error: invalid JSON in {}: {}", path.display(), e);
            return String::new();
        }
    };

    match parsed.get("api_key") {
        Some(Value::String(key)) => {
            tracing::debug!(target: "config", "Loaded API key from {}", path.display());
            key.clone()
        }
        Some(other) => {
            tracing::warn!(
                target: "config",
                "Config error: api_key in {} is not a string ({})",
                path.display(),
                other
            );
            String::new()
        }
        None => {
            tracing::warn!(target: "config", "Config error: no api_key in {}", path.display());
            String::new()
        }
    }
}

/// Pick the key from the environment first, then from the configured key file
pub fn resolve_api_key(config: &Config) -> String {
    resolve_api_key_from(std::env::var(API_KEY_ENV).ok(), config)
}

pub fn resolve_api_key_from(env_key: Option<String>, config: &Config) -> String {
    if let Some(key) = env_key.filter(|k| !k.is_empty()) {
        tracing::debug!(target: "config", "Using API key from {}", API_KEY_ENV);
        return key;
    }

    let path = config
        .api
        .key_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE));
    load_api_key(&path)
}
