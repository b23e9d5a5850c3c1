use crate::app::{
    action::Action, command::Command, features::history::HistoryPoller,
    input::map_event_to_action, reducer, state::AppState, ui,
};
use crate::domain::backend::AutomationBackend;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    backend: Arc<dyn AutomationBackend>,
    poll_interval: Duration,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, backend, poll_interval, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    backend: Arc<dyn AutomationBackend>,
    poll_interval: Duration,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Mount: the poller lives exactly as long as this loop.
    tracing::info!(base_url = %backend.base_url(), ?poll_interval, "panel mounted");
    let poller = HistoryPoller::spawn(backend.clone(), poll_interval, action_tx.clone());

    // Initial sync
    handle_command(Command::CheckHealth, backend.clone(), action_tx.clone())?;
    handle_command(
        Command::LoadAvailableCommands,
        backend.clone(),
        action_tx.clone(),
    )?;

    let size = terminal.size()?;
    reducer::update(&mut app_state, Action::Resize(size.width, size.height));

    let result = async {
        loop {
            // --- 1. Render ---
            terminal.draw(|f| {
                ui::draw(f, &app_state);
            })?;

            // --- 2. Event Handling (TEA Runtime) ---
            let action = tokio::select! {
                _ = interval.tick() => Some(Action::Tick),

                // User Input
                Some(res) = event_rx.recv() => {
                    let event = res?;
                    map_event_to_action(event, &app_state, terminal.size()?)
                },

                // Async Results
                Some(a) = action_rx.recv() => Some(a),
            };

            // --- 3. Update (Reducer) ---
            if let Some(action) = action {
                let command = reducer::update(&mut app_state, action);
                if app_state.should_quit {
                    break;
                }
                if let Some(cmd) = command {
                    handle_command(cmd, backend.clone(), action_tx.clone())?;
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    // Unmount
    poller.shutdown().await;
    tracing::info!("panel unmounted");
    result
}

pub(crate) fn handle_command(
    command: Command,
    backend: Arc<dyn AutomationBackend>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    crate::app::features::control::handle_command(command, backend, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
