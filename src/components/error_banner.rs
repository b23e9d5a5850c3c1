use crate::app::state::{ErrorSeverity, ErrorState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

const MAX_SUGGESTIONS: usize = 2;

/// Rows the banner needs: message + suggestions + borders, capped to a
/// quarter of the screen.
#[must_use]
pub fn banner_height(error: &ErrorState, screen_height: u16) -> u16 {
    let suggestions = error.suggestions.len().min(MAX_SUGGESTIONS) as u16;
    (3 + suggestions).min(screen_height / 4).max(3.min(screen_height))
}

pub struct ErrorBanner<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_text, title_style) = match self.error.severity {
            ErrorSeverity::Warning => (" WARNING ", self.theme.status_warn),
            ErrorSeverity::Error => (" ERROR ", self.theme.status_error),
        };
        let timestamp = self.error.timestamp.format("%H:%M:%S").to_string();

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title_text, title_style),
                Span::styled(format!(" {timestamp} "), self.theme.dimmed),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" "),
                Span::styled("Esc", self.theme.footer_segment_key),
                Span::raw(" dismiss "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(title_style)
            .style(self.theme.error_banner);

        let mut lines = vec![Line::from(Span::styled(
            self.error.message.as_str(),
            self.theme.error_banner,
        ))];
        for suggestion in self.error.suggestions.iter().take(MAX_SUGGESTIONS) {
            lines.push(Line::from(vec![
                Span::styled("  \u{2022} ", self.theme.dimmed),
                Span::styled(suggestion.as_str(), self.theme.list_item),
            ]));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
