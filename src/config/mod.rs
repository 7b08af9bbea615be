//! Configuration module
//!
//! This module contains the settings file and the API key loader.

pub mod api_key;
pub mod config;

pub use api_key::{load_api_key, resolve_api_key, DEFAULT_KEY_FILE};
pub use config::Config;
