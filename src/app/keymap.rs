use super::action::Action;
use super::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    /// Extra normal-mode bindings, action name -> key, e.g. `toggle_listening = "v"`.
    pub custom: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    pub normal: HashMap<KeyEvent, Action>,
    pub help: HashMap<KeyEvent, Action>,
}

impl KeyMap {
    pub fn from_config(config: &KeyConfig) -> Self {
        let mut normal = HashMap::new();
        let mut help = HashMap::new();

        // --- Normal Mode ---
        normal.insert(key('q'), Action::Quit);
        normal.insert(key('l'), Action::ToggleListening);
        normal.insert(key('w'), Action::ToggleWatching);
        normal.insert(key(':'), Action::EnterCommandMode);
        normal.insert(key('j'), Action::ScrollLogDown(1));
        normal.insert(code(KeyCode::Down), Action::ScrollLogDown(1));
        normal.insert(key('k'), Action::ScrollLogUp(1));
        normal.insert(code(KeyCode::Up), Action::ScrollLogUp(1));
        normal.insert(code(KeyCode::PageDown), Action::ScrollLogDown(10));
        normal.insert(code(KeyCode::PageUp), Action::ScrollLogUp(10));
        normal.insert(key('g'), Action::ScrollLogTop);
        normal.insert(code(KeyCode::Home), Action::ScrollLogTop);
        normal.insert(key('G'), Action::ScrollLogBottom);
        normal.insert(code(KeyCode::End), Action::ScrollLogBottom);
        normal.insert(key('?'), Action::ToggleHelp);
        normal.insert(code(KeyCode::Esc), Action::CancelMode);

        // --- Help Overlay ---
        help.insert(key('?'), Action::ToggleHelp);
        help.insert(key('q'), Action::ToggleHelp);
        help.insert(code(KeyCode::Esc), Action::CancelMode);

        if let Some(custom) = &config.custom {
            for (name, spec) in custom {
                match (action_by_name(name), parse_key(spec)) {
                    (Some(action), Some(event)) => {
                        normal.insert(event, action);
                    }
                    _ => tracing::warn!(name = %name, key = %spec, "ignoring invalid key binding"),
                }
            }
        }

        Self { normal, help }
    }

    pub fn get_action(&self, event: KeyEvent, mode: AppMode) -> Option<Action> {
        if is_ctrl_c(&event) {
            return Some(Action::Quit);
        }
        let event = normalize(event);
        match mode {
            AppMode::Normal => self.normal.get(&event).cloned(),
            AppMode::Help => self.help.get(&event).cloned(),
            AppMode::CommandInput => None,
        }
    }
}

pub fn is_ctrl_c(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}

// Terminals report `G` as shift+`G`; bindings are stored without the shift.
fn normalize(event: KeyEvent) -> KeyEvent {
    match event.code {
        KeyCode::Char(_) if event.modifiers == KeyModifiers::SHIFT => {
            KeyEvent::new(event.code, KeyModifiers::empty())
        }
        _ => KeyEvent::new(event.code, event.modifiers),
    }
}

fn action_by_name(name: &str) -> Option<Action> {
    let action = match name {
        "quit" => Action::Quit,
        "toggle_listening" => Action::ToggleListening,
        "toggle_watching" => Action::ToggleWatching,
        "command" => Action::EnterCommandMode,
        "scroll_down" => Action::ScrollLogDown(1),
        "scroll_up" => Action::ScrollLogUp(1),
        "scroll_top" => Action::ScrollLogTop,
        "scroll_bottom" => Action::ScrollLogBottom,
        "help" => Action::ToggleHelp,
        "dismiss_error" => Action::DismissError,
        _ => return None,
    };
    Some(action)
}

fn parse_key(spec: &str) -> Option<KeyEvent> {
    let (modifiers, rest) = match spec.strip_prefix("ctrl-") {
        Some(rest) => (KeyModifiers::CONTROL, rest),
        None => (KeyModifiers::empty(), spec),
    };
    let code = match rest.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(KeyEvent::new(code, modifiers))
}

fn key(c: char) -> KeyEvent {
    code(KeyCode::Char(c))
}

fn code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}
