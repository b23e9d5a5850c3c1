use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

/// Rect of `percent_x`% width and `height` rows, centred in `r`.
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(r.height))])
        .flex(Flex::Center)
        .areas(r);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x.min(100))])
        .flex(Flex::Center)
        .areas(row);
    area
}

pub fn draw_drop_shadow(buf: &mut Buffer, area: Rect, terminal_area: Rect) {
    let shadow_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        ..area
    }
    .intersection(terminal_area);

    for y in shadow_area.top()..shadow_area.bottom() {
        for x in shadow_area.left()..shadow_area.right() {
            let cell = &mut buf[(x, y)];
            cell.set_style(Style::default().bg(Color::Black));
            cell.set_symbol(" ");
        }
    }
}

/// Clears `modal_area`, draws its shadow and frame, and returns the inner area.
pub fn open_modal(
    buf: &mut Buffer,
    modal_area: Rect,
    screen: Rect,
    title: &str,
    theme: &Theme,
) -> Rect {
    draw_drop_shadow(buf, modal_area, screen);
    Clear.render(modal_area, buf);

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, theme.header_active),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focus);
    let inner = block.inner(modal_area);
    block.render(modal_area, buf);
    inner
}
