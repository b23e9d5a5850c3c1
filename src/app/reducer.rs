use super::{
    action::Action,
    command::Command,
    state::{AppMode, AppState, Connection, ErrorSeverity, ErrorState, InputState},
    ui,
};
use crate::domain::models::{Capability, StatusLabel};
use ratatui::layout::{Rect, Size};
use std::time::{Duration, Instant};

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(4);

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    match action {
        // --- Control Surface ---
        Action::ToggleListening => {
            return Some(begin_toggle(state, Capability::Listening));
        }
        Action::ToggleWatching => {
            return Some(begin_toggle(state, Capability::Watching));
        }
        Action::ToggleResolved(capability, result) => match result {
            Ok(enabled) => {
                let toggle = state.toggle_mut(capability);
                toggle.confirm(enabled);
                let phase = toggle.phase();
                tracing::info!(%capability, enabled, ?phase, "toggle confirmed by server");
                if capability == Capability::Listening {
                    state.status = StatusLabel::from_listening(enabled);
                }
            }
            Err(err) => {
                let toggle = state.toggle_mut(capability);
                toggle.reject();
                let phase = toggle.phase();
                tracing::info!(%capability, ?phase, "toggle rejected");
                state.set_error(format!("Failed to toggle {capability}: {err}"));
                if capability == Capability::Listening {
                    state.status = StatusLabel::Error;
                }
            }
        },

        // --- History ---
        Action::HistoryLoaded(entries) => {
            let visible = log_rows(state);
            state.log.replace(entries, visible);
            state.header.connection = Connection::Online;
        }
        Action::HistoryFailed(err) => {
            // The previous snapshot stays on screen untouched.
            tracing::debug!(error = %err, "keeping stale command log");
        }

        // --- Initial sync ---
        Action::HealthLoaded(Ok(report)) => {
            state.header.connection = Connection::Online;
            for capability in [Capability::Listening, Capability::Watching] {
                let toggle = state.toggle_mut(capability);
                // A toggle response is newer than this snapshot.
                if toggle.last_confirmed.is_none() {
                    toggle.enabled = report.enabled(capability);
                    toggle.last_confirmed = Some(chrono::Local::now());
                    if capability == Capability::Listening {
                        state.status = StatusLabel::from_listening(report.voice_enabled);
                    }
                }
            }
        }
        Action::HealthLoaded(Err(err)) => {
            tracing::warn!(error = %err, "backend health check failed");
            state.header.connection = Connection::Offline;
        }
        Action::AvailableCommandsLoaded(mut commands) => {
            commands.sort();
            state.available_commands = commands;
        }

        // --- Manual commands ---
        Action::EnterCommandMode => {
            state.mode = AppMode::CommandInput;
            state.input = Some(InputState::default());
        }
        Action::TextAreaInput(key) => {
            if let Some(input) = &mut state.input {
                input.text_area.input(key);
            }
        }
        Action::SubmitCommand => {
            let command = state.input.as_ref().and_then(InputState::command)?;
            state.mode = AppMode::Normal;
            state.input = None;
            state.last_error = None;
            return Some(Command::Execute(command));
        }
        Action::CommandExecuted(Ok(message)) => {
            state.status_message = Some(message);
            state.status_clear_time = Some(Instant::now() + STATUS_MESSAGE_TTL);
        }
        Action::CommandExecuted(Err(err)) => {
            // A rejected manual command leaves the capabilities untouched.
            state.last_error = Some(ErrorState::new(
                format!("Failed to execute command: {err}"),
                ErrorSeverity::Warning,
            ));
        }

        // --- UI ---
        Action::ScrollLogDown(amount) => {
            let visible = log_rows(state);
            state.log.scroll_down(amount, visible);
        }
        Action::ScrollLogUp(amount) => state.log.scroll_up(amount),
        Action::ScrollLogTop => state.log.scroll = 0,
        Action::ScrollLogBottom => {
            let visible = log_rows(state);
            state.log.scroll_to_bottom(visible);
        }
        Action::Resize(width, height) => {
            state.terminal_size = Size::new(width, height);
            let visible = log_rows(state);
            state.log.clamp(visible);
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
        }
        Action::CancelMode => {
            if state.mode == AppMode::Normal {
                state.last_error = None;
            } else {
                state.mode = AppMode::Normal;
                state.input = None;
            }
        }
        Action::DismissError => {
            state.last_error = None;
        }
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            if state
                .status_clear_time
                .is_some_and(|deadline| Instant::now() >= deadline)
            {
                state.status_message = None;
                state.status_clear_time = None;
            }
        }
    }
    None
}

// Sends the inverse of what is on screen; the screen itself only changes
// when the response arrives.
fn begin_toggle(state: &mut AppState, capability: Capability) -> Command {
    state.last_error = None;
    let toggle = state.toggle_mut(capability);
    let desired = toggle.begin_request();
    let phase = toggle.phase();
    tracing::info!(%capability, desired, ?phase, in_flight = toggle.in_flight, "requesting toggle");
    Command::Toggle(capability, desired)
}

// Rows inside the log pane's border for the current terminal size.
fn log_rows(state: &AppState) -> u16 {
    let area = Rect::new(0, 0, state.terminal_size.width, state.terminal_size.height);
    ui::get_layout(area, state).log.height.saturating_sub(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CommandLogEntry, HealthReport, TogglePhase};

    fn entry(command: &str) -> CommandLogEntry {
        CommandLogEntry {
            timestamp: "10:00:01".to_string(),
            kind: "voice".to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
        }
    }

    #[test]
    fn test_toggle_sends_inverse_without_flipping() {
        let mut state = AppState::default();

        let cmd = update(&mut state, Action::ToggleListening);
        assert_eq!(cmd, Some(Command::Toggle(Capability::Listening, true)));
        assert!(!state.listening.enabled);
        assert_eq!(state.listening.phase(), TogglePhase::RequestingEnable);
        assert_eq!(state.status, StatusLabel::Idle);

        update(
            &mut state,
            Action::ToggleResolved(Capability::Listening, Ok(true)),
        );
        assert!(state.listening.enabled);
        assert_eq!(state.status.to_string(), "Listening...");
        assert_eq!(state.listening.phase(), TogglePhase::Enabled);

        let cmd = update(&mut state, Action::ToggleListening);
        assert_eq!(cmd, Some(Command::Toggle(Capability::Listening, false)));
    }

    #[test]
    fn test_server_value_is_authoritative() {
        let mut state = AppState::default();
        update(&mut state, Action::ToggleWatching);
        // Asked for true, the backend kept it off.
        update(
            &mut state,
            Action::ToggleResolved(Capability::Watching, Ok(false)),
        );
        assert!(!state.watching.enabled);
        assert_eq!(state.watching.phase(), TogglePhase::Disabled);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_failure_keeps_state_and_sets_error() {
        let mut state = AppState::default();
        update(&mut state, Action::ToggleListening);
        update(
            &mut state,
            Action::ToggleResolved(Capability::Listening, Ok(true)),
        );

        update(&mut state, Action::ToggleListening);
        update(
            &mut state,
            Action::ToggleResolved(
                Capability::Listening,
                Err("HTTP error! status: 500".to_string()),
            ),
        );

        assert!(state.listening.enabled);
        assert_eq!(state.status, StatusLabel::Error);
        let error = state.last_error.as_ref().unwrap();
        assert_eq!(
            error.message,
            "Failed to toggle voice: HTTP error! status: 500"
        );
        assert!(!error.suggestions.is_empty());
    }

    #[test]
    fn test_initial_failure_scenario() {
        let mut state = AppState::default();
        update(&mut state, Action::ToggleListening);
        update(
            &mut state,
            Action::ToggleResolved(
                Capability::Listening,
                Err("HTTP error! status: 500".to_string()),
            ),
        );
        assert!(!state.listening.enabled);
        assert_eq!(state.status.to_string(), "Error");
        assert!(state.last_error.unwrap().message.contains("500"));
    }

    #[test]
    fn test_watching_failure_leaves_status_alone() {
        let mut state = AppState::default();
        update(&mut state, Action::ToggleWatching);
        update(
            &mut state,
            Action::ToggleResolved(Capability::Watching, Err("request failed: boom".to_string())),
        );
        assert_eq!(state.status, StatusLabel::Idle);
        assert!(state
            .last_error
            .unwrap()
            .message
            .starts_with("Failed to toggle visual:"));
    }

    #[test]
    fn test_new_request_clears_error() {
        let mut state = AppState::default();
        state.set_error("Failed to toggle visual: HTTP error! status: 502".to_string());

        update(&mut state, Action::ToggleListening);
        assert!(state.last_error.is_none());

        state.set_error("old".to_string());
        update(&mut state, Action::ToggleWatching);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_last_response_wins() {
        let mut state = AppState::default();
        // Two clicks before anything resolves: both ask for `true`.
        assert_eq!(
            update(&mut state, Action::ToggleListening),
            Some(Command::Toggle(Capability::Listening, true))
        );
        assert_eq!(
            update(&mut state, Action::ToggleListening),
            Some(Command::Toggle(Capability::Listening, true))
        );
        assert_eq!(state.listening.in_flight, 2);

        update(
            &mut state,
            Action::ToggleResolved(Capability::Listening, Ok(true)),
        );
        update(
            &mut state,
            Action::ToggleResolved(Capability::Listening, Ok(false)),
        );
        assert!(!state.listening.enabled);
        assert_eq!(state.status, StatusLabel::Idle);
        assert_eq!(state.listening.in_flight, 0);
    }

    #[test]
    fn test_capabilities_are_independent() {
        let mut state = AppState::default();
        update(&mut state, Action::ToggleWatching);
        update(&mut state, Action::ToggleListening);

        update(
            &mut state,
            Action::ToggleResolved(Capability::Listening, Ok(true)),
        );
        assert!(state.listening.enabled);
        assert!(!state.watching.enabled);

        update(
            &mut state,
            Action::ToggleResolved(Capability::Watching, Ok(true)),
        );
        assert!(state.watching.enabled);
        assert_eq!(state.status, StatusLabel::Listening);
    }

    #[test]
    fn test_history_replaced_wholesale() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::HistoryLoaded(vec![entry("a"), entry("b"), entry("c")]),
        );
        assert_eq!(state.log.entries.len(), 3);

        update(&mut state, Action::HistoryLoaded(vec![entry("d")]));
        assert_eq!(state.log.entries, vec![entry("d")]);

        update(&mut state, Action::HistoryLoaded(Vec::new()));
        assert!(state.log.entries.is_empty());
    }

    #[test]
    fn test_failed_poll_keeps_log() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::HistoryLoaded(vec![entry("a"), entry("b"), entry("c")]),
        );
        state.set_error("Failed to toggle voice: x".to_string());
        let before = state.clone();

        update(
            &mut state,
            Action::HistoryFailed("request failed: connection refused".to_string()),
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_health_seeds_unconfirmed_toggles_only() {
        let mut state = AppState::default();
        update(&mut state, Action::ToggleWatching);
        update(
            &mut state,
            Action::ToggleResolved(Capability::Watching, Ok(false)),
        );

        update(
            &mut state,
            Action::HealthLoaded(Ok(HealthReport {
                status: "healthy".to_string(),
                voice_enabled: true,
                visual_enabled: true,
            })),
        );

        assert!(state.listening.enabled);
        assert_eq!(state.status, StatusLabel::Listening);
        assert!(!state.watching.enabled);
        assert_eq!(state.header.connection, Connection::Online);
    }

    #[test]
    fn test_health_failure_is_not_an_error_banner() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::HealthLoaded(Err("request failed: refused".to_string())),
        );
        assert_eq!(state.header.connection, Connection::Offline);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_submit_command() {
        let mut state = AppState::default();
        update(&mut state, Action::EnterCommandMode);
        assert_eq!(state.mode, AppMode::CommandInput);

        // Blank input submits nothing and stays open.
        assert_eq!(update(&mut state, Action::SubmitCommand), None);
        assert_eq!(state.mode, AppMode::CommandInput);

        state
            .input
            .as_mut()
            .unwrap()
            .text_area
            .insert_str(" open browser ");
        state.set_error("old".to_string());
        assert_eq!(
            update(&mut state, Action::SubmitCommand),
            Some(Command::Execute("open browser".to_string()))
        );
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.input.is_none());
        assert!(state.last_error.is_none());

        update(
            &mut state,
            Action::CommandExecuted(Err("HTTP error! status: 400: Unknown command: x".to_string())),
        );
        assert!(state
            .last_error
            .unwrap()
            .message
            .starts_with("Failed to execute command:"));
    }

    #[test]
    fn test_failed_command_is_a_warning() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::CommandExecuted(Err("HTTP error! status: 400: Unknown command: x".to_string())),
        );
        let error = state.last_error.as_ref().unwrap();
        assert_eq!(error.severity, ErrorSeverity::Warning);
        assert!(error.suggestions.iter().any(|s| s.contains("Press ?")));

        // Toggle failures stay errors.
        update(&mut state, Action::ToggleWatching);
        update(
            &mut state,
            Action::ToggleResolved(Capability::Watching, Err("HTTP error! status: 500".to_string())),
        );
        assert_eq!(state.last_error.unwrap().severity, ErrorSeverity::Error);
    }

    #[test]
    fn test_status_message_expires() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::CommandExecuted(Ok("Command 'open browser' executed successfully".to_string())),
        );
        assert!(state.status_message.is_some());

        update(&mut state, Action::Tick);
        assert!(state.status_message.is_some());

        state.status_clear_time = Some(Instant::now());
        update(&mut state, Action::Tick);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_cancel_mode_then_dismiss() {
        let mut state = AppState::default();
        state.set_error("boom".to_string());
        update(&mut state, Action::ToggleHelp);
        assert_eq!(state.mode, AppMode::Help);

        update(&mut state, Action::CancelMode);
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.last_error.is_some());

        update(&mut state, Action::CancelMode);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_scroll_log() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::HistoryLoaded((0..20).map(|i| entry(&i.to_string())).collect()),
        );

        update(&mut state, Action::ScrollLogDown(5));
        assert_eq!(state.log.scroll, 5);
        update(&mut state, Action::ScrollLogUp(10));
        assert_eq!(state.log.scroll, 0);
        update(&mut state, Action::ScrollLogBottom);
        assert_eq!(state.log.scroll, 19);
        update(&mut state, Action::ScrollLogTop);
        assert_eq!(state.log.scroll, 0);
    }

    #[test]
    fn test_scroll_bottom_fills_log_pane() {
        let mut state = AppState::default();
        // 30 rows: header + footer leave a 28-row pane, 26 inside the border.
        update(&mut state, Action::Resize(100, 30));
        update(
            &mut state,
            Action::HistoryLoaded((0..40).map(|i| entry(&i.to_string())).collect()),
        );

        update(&mut state, Action::ScrollLogBottom);
        assert_eq!(state.log.scroll, 14);
        update(&mut state, Action::ScrollLogDown(10));
        assert_eq!(state.log.scroll, 14);

        // A taller terminal shows more, so the offset shrinks.
        update(&mut state, Action::Resize(100, 40));
        assert_eq!(state.log.scroll, 4);

        // Fewer entries than rows: the log never scrolls.
        update(&mut state, Action::HistoryLoaded(vec![entry("a"), entry("b")]));
        assert_eq!(state.log.scroll, 0);
        update(&mut state, Action::ScrollLogBottom);
        assert_eq!(state.log.scroll, 0);
    }

    struct LogBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuf {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let buf = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || LogBuf(sink.clone()))
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_toggle_logs_phase() {
        let mut state = AppState::default();
        let logs = capture_logs(|| {
            update(&mut state, Action::ToggleListening);
            update(
                &mut state,
                Action::ToggleResolved(Capability::Listening, Ok(true)),
            );
            update(&mut state, Action::ToggleListening);
            update(
                &mut state,
                Action::ToggleResolved(Capability::Listening, Err("boom".to_string())),
            );
        });

        assert!(logs.contains("phase=RequestingEnable"), "logs: {logs}");
        assert!(logs.contains("phase=Enabled"), "logs: {logs}");
        assert!(logs.contains("phase=RequestingDisable"), "logs: {logs}");
        assert!(logs.contains("toggle rejected"), "logs: {logs}");
    }
}
