use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Cannot determine data directory"))?
            .join("ataix-cli");

        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    /// Log directory, falling back to the temp dir when no data dir exists
    pub fn log_dir() -> PathBuf {
        match Self::data_dir() {
            Ok(dir) => dir.join("logs"),
            Err(_) => std::env::temp_dir().join("ataix-cli"),
        }
    }
}
