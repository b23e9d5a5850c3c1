use crate::domain::error::BackendError;
use crate::domain::models::{Capability, CommandLogEntry, HealthReport};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AutomationBackend: Send + Sync {
    // Sends the desired state; returns the state the server ended up in
    async fn toggle(&self, capability: Capability, desired: bool) -> Result<bool, BackendError>;

    // Full snapshot of the executed-command log
    async fn command_history(&self) -> Result<Vec<CommandLogEntry>, BackendError>;

    async fn health(&self) -> Result<HealthReport, BackendError>;

    // Manual command; returns the server's confirmation message
    async fn execute_command(&self, command: &str) -> Result<String, BackendError>;

    async fn available_commands(&self) -> Result<Vec<String>, BackendError>;

    fn base_url(&self) -> String;
}
