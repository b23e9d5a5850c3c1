use crate::app::state::LogState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub const EMPTY_LOG_TEXT: &str = "No commands executed yet...";

pub struct CommandLog<'a> {
    pub log: &'a LogState,
    pub theme: &'a Theme,
}

impl Widget for CommandLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("COMMAND LOG", self.theme.header_item),
                Span::styled(format!(" {} ", self.log.entries.len()), self.theme.dimmed),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" "),
                Span::styled("j/k", self.theme.footer_segment_key),
                Span::raw(": scroll "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border)
            .style(self.theme.log_panel);

        let lines: Vec<Line> = if self.log.entries.is_empty() {
            vec![Line::from(Span::styled(EMPTY_LOG_TEXT, self.theme.log_empty))]
        } else {
            self.log
                .lines()
                .into_iter()
                .map(|text| {
                    Line::from(vec![
                        Span::styled("\u{f489} ", self.theme.log_marker),
                        Span::styled(text, self.theme.log_line),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines)
            .block(block)
            .scroll((self.log.scroll, 0))
            .render(area, buf);
    }
}
