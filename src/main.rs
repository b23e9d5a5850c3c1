use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use deskpilot::app::{r#loop::run_loop, state::AppState};
use deskpilot::config::{Cli, PanelConfig};
use deskpilot::infrastructure::http_backend::HttpBackend;
use deskpilot::logging;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    // Config, logging and the HTTP client are set up BEFORE terminal setup
    // so a bad config file doesn't leave the terminal in raw mode.
    let cli = Cli::parse();
    let config = PanelConfig::load(&cli)?;
    let _log_guard = logging::init(&config.log_path())?;
    tracing::info!(base_url = %config.base_url, "starting deskpilot");

    let backend = Arc::new(HttpBackend::new(&config).context("Failed to build HTTP client")?);
    let app_state = AppState::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, backend, config.poll_interval()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "panel exited with an error");
        println!("{:?}", err);
    }

    Ok(())
}
