use ataix_cli::api_client::ApiClient;
use ataix_cli::config::{resolve_api_key, Config};
use ataix_cli::projection::TableProjection;
use ataix_cli::table_display::display_projection;
use ataix_cli::ui::actions::Action;
use crossterm::style::Stylize;
use std::path::PathBuf;

fn print_help() {
    println!("{}", "ATAIX CLI - exchange data browser".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  ataix-cli [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}    - Use an alternative settings file", "--config <FILE>".green());
    println!(
        "  {}     - Fetch once and print a table (currencies|symbols|prices)",
        "--fetch <NAME>".green()
    );
    println!(
        "  {}  - Write a commented settings file to the default location",
        "--generate-config".green()
    );
    println!("  {}             - Show this help", "--help".green());
    println!();
    println!("{}", "Environment:".yellow());
    println!("  ATAIX_API_KEY  - API key, overrides Api.json");
    println!("  ATAIX_API_URL  - Base URL, overrides the settings file");
    println!("  RUST_LOG       - Log filter (default: info)");
    println!();
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn generate_config() -> anyhow::Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {:?}", path);
    println!("Edit this file to point the client at another host or key file.");
    Ok(())
}

async fn fetch_once(client: &ApiClient, action: Action) -> bool {
    let Some(path) = action.endpoint() else {
        return true;
    };
    println!("{}", format!("Fetching {}{}", client.base_url(), path).cyan());

    let outcome = client.fetch(path).await;
    display_projection(&TableProjection::from_outcome(&outcome));
    outcome.is_ok()
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return;
    }

    if args.contains(&"--generate-config".to_string()) {
        if let Err(e) = generate_config() {
            eprintln!("Error writing config file: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Some(log_path) = ataix_cli::utils::logging::init_tracing() {
        eprintln!("📝 Logs are written to {}", log_path.display());
    }

    let config = match flag_value(&args, "--config") {
        Some(path) => Config::load_from(&PathBuf::from(path)),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading settings: {:#}", e);
            std::process::exit(1);
        }
    };

    let api_key = resolve_api_key(&config);
    let client = match ApiClient::new(config.api_config(api_key)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating API client: {:#}", e);
            std::process::exit(1);
        }
    };

    if args.contains(&"--fetch".to_string()) {
        let name = flag_value(&args, "--fetch").unwrap_or_default();
        let Some(action) = Action::from_name(&name) else {
            eprintln!(
                "{}",
                format!("Unknown endpoint '{}', expected currencies, symbols or prices", name).red()
            );
            std::process::exit(2);
        };
        if !fetch_once(&client, action).await {
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = ataix_cli::ui::tui_app::run_tui_app(client, config.display) {
        eprintln!("TUI Error: {:#}", e);
        std::process::exit(1);
    }
}
