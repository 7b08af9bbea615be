//! User interface layer
//!
//! The full-screen terminal app: four buttons above a results table.

pub mod actions;
pub mod app;
pub mod render;
pub mod tui_app;
