use crate::app::state::{AppMode, AppState};
use crate::components::command_log::CommandLog;
use crate::components::control_panel::{control_layout, ControlPanel};
use crate::components::error_banner::{banner_height, ErrorBanner};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::{command_input::CommandInputModal, help::HelpModal};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub struct AppLayout {
    pub header: Rect,
    pub banner: Rect,
    pub control: Rect,
    pub log: Rect,
    pub footer: Rect,
    pub listen_button: Rect,
    pub watch_button: Rect,
}

pub fn get_layout(area: Rect, app_state: &AppState) -> AppLayout {
    let banner = app_state
        .last_error
        .as_ref()
        .map_or(0, |e| banner_height(e, area.height));

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Header
            Constraint::Length(banner), // Error banner
            Constraint::Min(0),         // Body
            Constraint::Length(1),      // Footer
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(main[2]);

    let control = control_layout(body[0]);

    AppLayout {
        header: main[0],
        banner: main[1],
        control: body[0],
        log: body[1],
        footer: main[3],
        listen_button: control.listen_button,
        watch_button: control.watch_button,
    }
}

pub fn draw(f: &mut Frame, app_state: &AppState) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    let layout = get_layout(f.area(), app_state);
    let theme = &app_state.theme;

    if has_area(layout.header) {
        f.render_widget(
            Header {
                state: &app_state.header,
                theme,
            },
            layout.header,
        );
    }

    if let Some(error) = &app_state.last_error {
        if has_area(layout.banner) {
            f.render_widget(ErrorBanner { error, theme }, layout.banner);
        }
    }

    if has_area(layout.control) {
        f.render_widget(
            ControlPanel {
                listening: &app_state.listening,
                watching: &app_state.watching,
                status: app_state.status,
                command_count: app_state.available_commands.len(),
                focused: app_state.mode == AppMode::Normal,
                theme,
            },
            layout.control,
        );
    }

    if has_area(layout.log) {
        f.render_widget(
            CommandLog {
                log: &app_state.log,
                theme,
            },
            layout.log,
        );
    }

    if has_area(layout.footer) {
        f.render_widget(
            Footer {
                mode: app_state.mode,
                has_error: app_state.last_error.is_some(),
                status_message: app_state.status_message.as_deref(),
                theme,
            },
            layout.footer,
        );
    }

    // --- Overlays ---
    match app_state.mode {
        AppMode::Help => f.render_widget(
            HelpModal {
                theme,
                commands: &app_state.available_commands,
            },
            f.area(),
        ),
        AppMode::CommandInput => {
            if let Some(input) = &app_state.input {
                f.render_widget(
                    CommandInputModal {
                        theme,
                        text_area: &input.text_area,
                        commands: &app_state.available_commands,
                    },
                    f.area(),
                );
            }
        }
        AppMode::Normal => {}
    }
}

fn has_area(r: Rect) -> bool {
    r.width > 0 && r.height > 0
}
