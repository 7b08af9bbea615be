//! Utility functions and helpers
//!
//! Platform paths and the file-backed log writer.

pub mod app_paths;
pub mod logging;
