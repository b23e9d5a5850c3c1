use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Listening,
    Watching,
}

impl Capability {
    /// Name the backend uses for this capability (`voice` / `visual`).
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Capability::Listening => "voice",
            Capability::Watching => "visual",
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Capability::Listening => "/toggle-voice",
            Capability::Watching => "/toggle-visual",
        }
    }

    /// Field of the toggle response carrying the resulting state.
    #[must_use]
    pub fn response_field(&self) -> &'static str {
        match self {
            Capability::Listening => "voice_enabled",
            Capability::Watching => "visual_enabled",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Listening => "Listening",
            Capability::Watching => "Watching",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePhase {
    Disabled,
    RequestingEnable,
    Enabled,
    RequestingDisable,
}

/// Local mirror of one capability. `enabled` is only ever written from a
/// server response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToggleState {
    pub enabled: bool,
    pub in_flight: u32,
    pub last_requested: Option<bool>,
    pub last_confirmed: Option<DateTime<Local>>,
}

impl ToggleState {
    #[must_use]
    pub fn phase(&self) -> TogglePhase {
        let requesting_change = self.in_flight > 0 && self.last_requested == Some(!self.enabled);
        match (self.enabled, requesting_change) {
            (false, false) => TogglePhase::Disabled,
            (false, true) => TogglePhase::RequestingEnable,
            (true, false) => TogglePhase::Enabled,
            (true, true) => TogglePhase::RequestingDisable,
        }
    }

    /// Records an outgoing request and returns the desired value to send.
    pub fn begin_request(&mut self) -> bool {
        let desired = !self.enabled;
        self.in_flight = self.in_flight.saturating_add(1);
        self.last_requested = Some(desired);
        desired
    }

    pub fn confirm(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.in_flight = self.in_flight.saturating_sub(1);
        self.last_confirmed = Some(Local::now());
    }

    pub fn reject(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLabel {
    #[default]
    Idle,
    Listening,
    Error,
}

impl StatusLabel {
    #[must_use]
    pub fn from_listening(enabled: bool) -> Self {
        if enabled {
            StatusLabel::Listening
        } else {
            StatusLabel::Idle
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StatusLabel::Idle => "Idle",
            StatusLabel::Listening => "Listening...",
            StatusLabel::Error => "Error",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandLogEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub status: String,
}

impl fmt::Display for CommandLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.timestamp, self.kind, self.command, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub voice_enabled: bool,
    #[serde(default)]
    pub visual_enabled: bool,
}

impl HealthReport {
    #[must_use]
    pub fn enabled(&self, capability: Capability) -> bool {
        match capability {
            Capability::Listening => self.voice_enabled,
            Capability::Watching => self.visual_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display() {
        let entry = CommandLogEntry {
            timestamp: "10:00:01".to_string(),
            kind: "voice".to_string(),
            command: "open browser".to_string(),
            status: "ok".to_string(),
        };
        assert_eq!(entry.to_string(), "[10:00:01] voice: open browser (ok)");
    }

    #[test]
    fn test_entry_deserialize_type_field() {
        let entry: CommandLogEntry = serde_json::from_str(
            r#"{"timestamp":"2024-01-01 10:00:00","type":"manual","command":"open notepad","status":"success"}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, "manual");
        assert_eq!(entry.command, "open notepad");

        let partial: CommandLogEntry = serde_json::from_str(r#"{"command":"x"}"#).unwrap();
        assert_eq!(partial.timestamp, "");
        assert_eq!(partial.status, "");
    }

    #[test]
    fn test_toggle_phases() {
        let mut state = ToggleState::default();
        assert_eq!(state.phase(), TogglePhase::Disabled);

        assert!(state.begin_request());
        assert_eq!(state.phase(), TogglePhase::RequestingEnable);

        state.confirm(true);
        assert_eq!(state.phase(), TogglePhase::Enabled);
        assert!(state.last_confirmed.is_some());

        assert!(!state.begin_request());
        assert_eq!(state.phase(), TogglePhase::RequestingDisable);

        state.reject();
        assert_eq!(state.phase(), TogglePhase::Enabled);
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn test_server_rejection_returns_to_disabled() {
        let mut state = ToggleState::default();
        state.begin_request();
        // Server answered, but kept the capability off.
        state.confirm(false);
        assert_eq!(state.phase(), TogglePhase::Disabled);
        assert!(!state.enabled);
    }

    #[test]
    fn test_status_label_text() {
        assert_eq!(StatusLabel::from_listening(true).to_string(), "Listening...");
        assert_eq!(StatusLabel::from_listening(false).to_string(), "Idle");
        assert_eq!(StatusLabel::Error.to_string(), "Error");
    }
}
