use crate::app::keymap::is_ctrl_c;
use crate::app::state::AppMode;
use crate::app::{action::Action, state::AppState, ui};
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            match app_state.mode {
                AppMode::CommandInput => {
                    if is_ctrl_c(&key) {
                        return Some(Action::Quit);
                    }
                    match key.code {
                        KeyCode::Esc => Some(Action::CancelMode),
                        KeyCode::Enter => Some(Action::SubmitCommand),
                        _ => Some(Action::TextAreaInput(key)),
                    }
                }
                mode => app_state.keymap.get_action(key, mode),
            }
        }
        Event::Mouse(mouse) => {
            if app_state.mode != AppMode::Normal {
                return None;
            }
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            let layout = ui::get_layout(area, app_state);
            let pos = Position::new(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if layout.listen_button.contains(pos) {
                        Some(Action::ToggleListening)
                    } else if layout.watch_button.contains(pos) {
                        Some(Action::ToggleWatching)
                    } else if layout.banner.contains(pos) {
                        Some(Action::DismissError)
                    } else {
                        None
                    }
                }
                MouseEventKind::ScrollDown if layout.log.contains(pos) => {
                    Some(Action::ScrollLogDown(3))
                }
                MouseEventKind::ScrollUp if layout.log.contains(pos) => {
                    Some(Action::ScrollLogUp(3))
                }
                _ => None,
            }
        }
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    }
}
