use crate::domain::models::{Capability, StatusLabel, ToggleState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub struct ControlLayout {
    pub listen_button: Rect,
    pub watch_button: Rect,
    pub status: Rect,
    pub info: Rect,
}

/// Sub-layout of the control pane; shared with mouse hit-testing.
pub fn control_layout(area: Rect) -> ControlLayout {
    let inner = area.inner(Margin::new(2, 1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Status
            Constraint::Min(0),    // Info
        ])
        .split(inner);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(48),
            Constraint::Percentage(4),
            Constraint::Percentage(48),
        ])
        .split(rows[1]);

    ControlLayout {
        listen_button: buttons[0],
        watch_button: buttons[2],
        status: rows[3],
        info: rows[4],
    }
}

pub struct ControlPanel<'a> {
    pub listening: &'a ToggleState,
    pub watching: &'a ToggleState,
    pub status: StatusLabel,
    pub command_count: usize,
    pub focused: bool,
    pub theme: &'a Theme,
}

#[must_use]
pub fn button_text(capability: Capability, enabled: bool) -> String {
    let verb = if enabled { "Stop" } else { "Start" };
    format!("{verb} {}", capability.label())
}

impl ControlPanel<'_> {
    fn render_button(
        &self,
        capability: Capability,
        key: &str,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let state = match capability {
            Capability::Listening => self.listening,
            Capability::Watching => self.watching,
        };
        let style = match (capability, state.enabled) {
            (_, false) => self.theme.button_off,
            (Capability::Listening, true) => self.theme.button_listening,
            (Capability::Watching, true) => self.theme.button_watching,
        };
        let icon = match (capability, state.enabled) {
            (Capability::Listening, true) => "\u{f036c}",
            (Capability::Listening, false) => "\u{f036d}",
            (Capability::Watching, true) => "\u{f0208}",
            (Capability::Watching, false) => "\u{f0209}",
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(style.bg.unwrap_or_default()))
            .title_bottom(Line::from(Span::styled(format!(" {key} "), self.theme.dimmed)).right_aligned());

        Paragraph::new(Line::from(vec![
            Span::raw(format!("{icon} ")),
            Span::raw(button_text(capability, state.enabled)),
        ]))
        .style(style)
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
    }
}

impl Widget for ControlPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            self.theme.border_focus
        } else {
            self.theme.border
        };
        Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("CONTROL PANEL", self.theme.header_item),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .render(area, buf);

        let layout = control_layout(area);
        if layout.listen_button.height > 0 {
            self.render_button(Capability::Listening, "l", layout.listen_button, buf);
            self.render_button(Capability::Watching, "w", layout.watch_button, buf);
        }

        if layout.status.height > 0 {
            let status_style = match self.status {
                StatusLabel::Idle => self.theme.list_item,
                StatusLabel::Listening => self.theme.status_ready,
                StatusLabel::Error => self.theme.status_error,
            };
            Paragraph::new(Line::from(vec![
                Span::styled("Status: ", self.theme.list_item),
                Span::styled(format!(" {} ", self.status), status_style),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(self.theme.border),
            )
            .render(layout.status, buf);
        }

        if layout.info.height > 0 {
            let confirmed = |t: &ToggleState| {
                t.last_confirmed
                    .map_or_else(|| "never".to_string(), |ts| ts.format("%H:%M:%S").to_string())
            };
            let lines = vec![
                Line::from(Span::styled(
                    format!("Listening confirmed: {}", confirmed(self.listening)),
                    self.theme.dimmed,
                )),
                Line::from(Span::styled(
                    format!("Watching confirmed:  {}", confirmed(self.watching)),
                    self.theme.dimmed,
                )),
                Line::from(Span::styled(
                    format!("Backend commands:    {}", self.command_count),
                    self.theme.dimmed,
                )),
            ];
            Paragraph::new(lines).render(layout.info, buf);
        }
    }
}
