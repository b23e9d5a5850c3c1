use crate::app::state::{Connection, HeaderState};
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SEP_RIGHT: &str = "\u{e0b0}";

pub struct Header<'a> {
    pub state: &'a HeaderState,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let connection_style = match self.state.connection {
            Connection::Online => self.theme.header_online,
            Connection::Offline => self.theme.header_offline,
            Connection::Unknown => self.theme.header_item,
        };

        // Separator styles: fg = current segment bg, bg = next segment bg
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let subtitle_bg = self.theme.header_subtitle.bg.unwrap_or(Color::Reset);
        let url_bg = self.theme.header_item.bg.unwrap_or(Color::Reset);
        let conn_bg = connection_style.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);

        let mut spans = vec![
            Span::styled(" DESKPILOT ", self.theme.header_logo),
            Span::styled(SEP_RIGHT, Style::default().fg(logo_bg).bg(subtitle_bg)),
        ];

        // Drop the subtitle first on narrow terminals.
        if area.width >= 70 {
            spans.push(Span::styled(
                " Your personal automation system ",
                self.theme.header_subtitle,
            ));
            spans.push(Span::styled(
                SEP_RIGHT,
                Style::default().fg(subtitle_bg).bg(url_bg),
            ));
        }

        spans.extend([
            Span::styled(format!(" {} ", self.state.backend_url), self.theme.header_item),
            Span::styled(SEP_RIGHT, Style::default().fg(url_bg).bg(conn_bg)),
            Span::styled(self.state.connection_text(), connection_style),
            Span::styled(SEP_RIGHT, Style::default().fg(conn_bg).bg(base_bg)),
        ]);

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
