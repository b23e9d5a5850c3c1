use super::keymap::{KeyConfig, KeyMap};
use crate::config::PanelConfig;
use crate::domain::models::{Capability, StatusLabel, ToggleState};
use crate::theme::Theme;
use ratatui::layout::Size;
use std::sync::Arc;
use std::time::Instant;

pub mod error;
pub mod header;
pub mod input;
pub mod log;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use header::{Connection, HeaderState};
pub use input::{AppTextArea, InputState};
pub use log::LogState;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,       // Control panel + log
    CommandInput, // Typing a manual command
    Help,         // Showing the help overlay
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Lifecycle & Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>, // "Command 'open browser' executed successfully"
    pub status_clear_time: Option<Instant>,

    // --- Server mirror (only written from responses) ---
    pub listening: ToggleState,
    pub watching: ToggleState,
    pub status: StatusLabel,
    pub log: LogState,
    pub available_commands: Vec<String>,

    // --- Presentation ---
    pub header: HeaderState,
    pub input: Option<InputState<'a>>,
    pub frame_count: u64,
    pub terminal_size: Size,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub theme: Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            keymap: Arc::new(KeyMap::from_config(&config.keys)),
            theme: Theme::from_palette_type(config.palette),
            header: HeaderState {
                backend_url: config.base_url.clone(),
                ..HeaderState::default()
            },
            ..Default::default()
        }
    }

    pub fn toggle_mut(&mut self, capability: Capability) -> &mut ToggleState {
        match capability {
            Capability::Listening => &mut self.listening,
            Capability::Watching => &mut self.watching,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.last_error = Some(ErrorState::new(message, ErrorSeverity::Error));
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            listening: ToggleState::default(),
            watching: ToggleState::default(),
            status: StatusLabel::Idle,
            log: LogState::default(),
            available_commands: Vec::new(),
            header: HeaderState::default(),
            input: None,
            frame_count: 0,
            terminal_size: Size::default(),
            keymap: Arc::new(KeyMap::from_config(&KeyConfig::default())),
            theme: Theme::default(),
        }
    }
}
