use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table, Widget},
};

use super::helpers::{centered_rect, open_modal};

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Capture",
        &[
            (" l", "Start / stop listening (voice)"),
            (" w", "Start / stop watching (visual)"),
        ],
    ),
    (
        "Command Log",
        &[
            (" j / \u{2193}", "Scroll down"),
            (" k / \u{2191}", "Scroll up"),
            (" PgDn / PgUp", "Scroll a page"),
            (" g / G", "Jump to first / last entry"),
        ],
    ),
    (
        "General",
        &[
            (" :", "Run a backend command"),
            (" Esc", "Close overlay / dismiss error"),
            (" ?", "Toggle this help"),
            (" q / Ctrl-c", "Quit"),
        ],
    ),
];

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
    pub commands: &'a [String],
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = self.theme.footer_segment_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;

        let mut rows = Vec::new();
        for (category, entries) in BINDINGS {
            rows.push(Row::new(vec![
                Cell::from(Span::styled(*category, category_style)),
                Cell::from(""),
            ]));
            for (key, desc) in *entries {
                rows.push(Row::new(vec![
                    Cell::from(Span::styled(*key, key_style)),
                    Cell::from(Span::styled(*desc, desc_style)),
                ]));
            }
            rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
        }

        rows.push(Row::new(vec![
            Cell::from(Span::styled("Backend Commands", category_style)),
            Cell::from(""),
        ]));
        if self.commands.is_empty() {
            rows.push(Row::new(vec![
                Cell::from(""),
                Cell::from(Span::styled("(not loaded)", self.theme.dimmed)),
            ]));
        } else {
            rows.push(Row::new(vec![
                Cell::from(""),
                Cell::from(Span::styled(self.commands.join(", "), desc_style)),
            ]));
        }

        let height = (rows.len() as u16).saturating_add(2);
        let modal_area = centered_rect(70, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }
        let inner = open_modal(buf, modal_area, area, " HELP - KEYBINDINGS ", self.theme);

        Table::new(rows, [Constraint::Length(16), Constraint::Min(10)])
            .column_spacing(2)
            .render(inner, buf);
    }
}
