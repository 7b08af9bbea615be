pub mod api_client;
pub mod config;
pub mod projection;
pub mod table_display;
pub mod ui;
pub mod utils;
