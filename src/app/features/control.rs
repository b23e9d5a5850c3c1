use crate::app::{action::Action, command::Command};
use crate::domain::backend::AutomationBackend;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs a reducer side effect on its own task. Results come back as actions
/// in completion order, so the last response to resolve wins.
pub fn handle_command(
    command: Command,
    backend: Arc<dyn AutomationBackend>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::Toggle(capability, desired) => {
            tokio::spawn(async move {
                let result = match backend.toggle(capability, desired).await {
                    Ok(enabled) => {
                        if enabled != desired {
                            tracing::info!(%capability, desired, enabled, "backend kept a different state");
                        }
                        Ok(enabled)
                    }
                    Err(e) => {
                        tracing::warn!(%capability, error = %e, "toggle request failed");
                        Err(e.to_string())
                    }
                };
                let _ = tx.send(Action::ToggleResolved(capability, result)).await;
            });
        }
        Command::Execute(text) => {
            tokio::spawn(async move {
                let result = backend.execute_command(&text).await.map_err(|e| {
                    tracing::warn!(command = %text, error = %e, "manual command failed");
                    e.to_string()
                });
                let _ = tx.send(Action::CommandExecuted(result)).await;
            });
        }
        Command::CheckHealth => {
            tokio::spawn(async move {
                let result = backend.health().await.map_err(|e| e.to_string());
                let _ = tx.send(Action::HealthLoaded(result)).await;
            });
        }
        Command::LoadAvailableCommands => {
            tokio::spawn(async move {
                match backend.available_commands().await {
                    Ok(commands) => {
                        let _ = tx.send(Action::AvailableCommandsLoaded(commands)).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "could not load available commands");
                    }
                }
            });
        }
    }
    Ok(())
}
