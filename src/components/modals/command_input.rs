use crate::app::state::AppTextArea;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::helpers::{centered_rect, open_modal};

pub struct CommandInputModal<'a, 'b> {
    pub theme: &'a Theme,
    pub text_area: &'a AppTextArea<'b>,
    pub commands: &'a [String],
}

impl Widget for CommandInputModal<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hint_rows: u16 = if self.commands.is_empty() { 0 } else { 3 };
        let modal_area = centered_rect(60, 3 + hint_rows, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        let inner = open_modal(buf, modal_area, area, " RUN COMMAND ", self.theme);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        if rows[0].width > 0 && rows[0].height > 0 {
            Widget::render(self.text_area, rows[0], buf);
        }

        if hint_rows > 0 && rows[1].height > 0 {
            let hint = Line::from(vec![
                Span::styled("Known: ", self.theme.footer_group_name),
                Span::styled(self.commands.join(", "), self.theme.dimmed),
            ]);
            Paragraph::new(vec![Line::from(""), hint])
                .wrap(Wrap { trim: true })
                .render(rows[1], buf);
        }
    }
}
