use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;

use crate::api_client::ApiClient;
use crate::config::config::DisplayConfig;
use crate::ui::app::App;
use crate::ui::render::render;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Draw, apply finished fetches, handle input; until Exit is activated
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.drain_results();
        terminal.draw(|f| render(f, app))?;

        if event::poll(EVENT_POLL_INTERVAL)? {
            app.handle_event(event::read()?);
        }

        if app.should_quit() {
            tracing::info!(target: "ui", "Exit requested");
            return Ok(());
        }
    }
}

pub fn run_tui_app(client: ApiClient, display: DisplayConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, display);
    let res = run_app(&mut terminal, &mut app);
    app.cancel_pending();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}
