use crate::config::PanelConfig;
use crate::domain::backend::AutomationBackend;
use crate::domain::error::BackendError;
use crate::domain::models::{Capability, CommandLogEntry, HealthReport};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const JSON: &str = "application/json";

/// Talks to the automation backend over its JSON HTTP API.
///
/// No request timeout is configured: a hung request simply never resolves,
/// which leaves the caller's state untouched.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    history_limit: Option<usize>,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ToggleRequest {
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    command: &'a str,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Option<Vec<CommandLogEntry>>,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommandsResponse {
    #[serde(default)]
    commands: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &PanelConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            history_limit: config.history_limit,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(BackendError::Http { status, message });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl AutomationBackend for HttpBackend {
    async fn toggle(&self, capability: Capability, desired: bool) -> Result<bool, BackendError> {
        tracing::debug!(%capability, desired, "sending toggle request");
        let response = self
            .http
            .post(self.url(capability.endpoint()))
            .header(ACCEPT, JSON)
            .json(&ToggleRequest { enabled: desired })
            .send()
            .await?;

        let body: serde_json::Value = Self::read_json(response).await?;
        body.get(capability.response_field())
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| BackendError::Decode {
                message: format!("response is missing `{}`", capability.response_field()),
            })
    }

    async fn command_history(&self) -> Result<Vec<CommandLogEntry>, BackendError> {
        tracing::debug!(limit = ?self.history_limit, "fetching command history");
        let mut request = self
            .http
            .get(self.url("/command-history"))
            .header(ACCEPT, JSON);
        if let Some(limit) = self.history_limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?;
        let body: HistoryResponse = Self::read_json(response).await?;
        Ok(body.history.unwrap_or_default())
    }

    async fn health(&self) -> Result<HealthReport, BackendError> {
        tracing::debug!("checking backend health");
        let response = self
            .http
            .get(self.url("/health"))
            .header(ACCEPT, JSON)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn execute_command(&self, command: &str) -> Result<String, BackendError> {
        tracing::debug!(command, "executing manual command");
        let response = self
            .http
            .post(self.url("/execute-command"))
            .header(ACCEPT, JSON)
            .json(&ExecuteRequest { command })
            .send()
            .await?;
        let body: ExecuteResponse = Self::read_json(response).await?;
        Ok(body
            .message
            .unwrap_or_else(|| format!("Command '{command}' executed")))
    }

    async fn available_commands(&self) -> Result<Vec<String>, BackendError> {
        tracing::debug!("fetching available commands");
        let response = self
            .http
            .get(self.url("/available-commands"))
            .header(ACCEPT, JSON)
            .send()
            .await?;
        let body: CommandsResponse = Self::read_json(response).await?;
        Ok(body.commands)
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
