//! Wire contract for the automation backend's HTTP API.

use deskpilot::config::PanelConfig;
use deskpilot::domain::backend::AutomationBackend;
use deskpilot::domain::error::BackendError;
use deskpilot::domain::models::Capability;
use deskpilot::infrastructure::http_backend::HttpBackend;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    let config = PanelConfig {
        base_url: server.uri(),
        ..PanelConfig::default()
    };
    HttpBackend::new(&config).unwrap()
}

// ── toggles ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_voice_sends_desired_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/toggle-voice"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"enabled": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"voice_enabled": true})))
        .expect(1)
        .mount(&server)
        .await;

    let enabled = backend_for(&server)
        .toggle(Capability::Listening, true)
        .await
        .unwrap();
    assert!(enabled);
}

#[tokio::test]
async fn test_toggle_returns_server_state_not_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/toggle-visual"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"enabled": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"visual_enabled": false})))
        .expect(1)
        .mount(&server)
        .await;

    let enabled = backend_for(&server)
        .toggle(Capability::Watching, true)
        .await
        .unwrap();
    assert!(!enabled, "server said visual stayed off");
}

#[tokio::test]
async fn test_toggle_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/toggle-voice"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .toggle(Capability::Listening, true)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn test_toggle_missing_field_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/toggle-voice"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .toggle(Capability::Listening, false)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_toggle_non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/toggle-visual"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .toggle(Capability::Watching, true)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Decode { .. }), "got {err:?}");
}

// ── command history ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_history_parses_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/command-history"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [
                {"timestamp": "10:00:01", "type": "voice", "command": "open browser", "status": "ok"},
                {"timestamp": "10:00:05", "type": "visual", "command": "wave", "status": "ignored"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let history = backend_for(&server).command_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].kind, "voice");
    assert_eq!(
        history[1].to_string(),
        "[10:00:05] visual: wave (ignored)"
    );
}

#[tokio::test]
async fn test_history_missing_field_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/command-history"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let history = backend_for(&server).command_history().await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_history_sends_configured_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/command-history"))
        .and(header("accept", "application/json"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = PanelConfig {
        base_url: server.uri(),
        history_limit: Some(25),
        ..PanelConfig::default()
    };
    let history = HttpBackend::new(&config)
        .unwrap()
        .command_history()
        .await
        .unwrap();
    assert!(history.is_empty());
}

// ── health, manual commands ──────────────────────────────────────────────

#[tokio::test]
async fn test_health_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "voice_enabled": true,
            "visual_enabled": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let health = backend_for(&server).health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.enabled(Capability::Listening));
    assert!(!health.enabled(Capability::Watching));
}

#[tokio::test]
async fn test_execute_command_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute-command"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"command": "open browser"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Command 'open browser' executed successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let message = backend_for(&server)
        .execute_command("open browser")
        .await
        .unwrap();
    assert_eq!(message, "Command 'open browser' executed successfully");
}

#[tokio::test]
async fn test_execute_unknown_command_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute-command"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Unknown command: dance"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .execute_command("dance")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "HTTP error! status: 400: Unknown command: dance"
    );
}

#[tokio::test]
async fn test_available_commands() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/available-commands"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commands": ["open browser", "open notepad"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let commands = backend_for(&server).available_commands().await.unwrap();
    assert_eq!(commands, vec!["open browser", "open notepad"]);
}

// ── transport ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_backend_is_request_error() {
    // Grab a free port and release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = PanelConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        ..PanelConfig::default()
    };

    let err = HttpBackend::new(&config)
        .unwrap()
        .toggle(Capability::Listening, true)
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Request { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("request failed"));
}

// ── diagnostics ──────────────────────────────────────────────────────────

struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuf {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_every_call_logs_at_debug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/command-history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/available-commands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"commands": []})))
        .mount(&server)
        .await;

    let buf = Arc::new(Mutex::new(Vec::new()));
    let sink = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || LogBuf(sink.clone()))
        .finish();
    // The test runtime is single-threaded, so the default covers every poll.
    let _guard = tracing::subscriber::set_default(subscriber);

    let backend = backend_for(&server);
    backend.command_history().await.unwrap();
    backend.health().await.unwrap();
    backend.available_commands().await.unwrap();

    let logs = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    for expected in [
        "fetching command history",
        "checking backend health",
        "fetching available commands",
    ] {
        assert!(logs.contains(expected), "missing {expected:?} in: {logs}");
    }
    assert!(logs.contains("DEBUG"));
}
