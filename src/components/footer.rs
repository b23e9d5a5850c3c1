use crate::app::state::AppMode;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct FooterItem {
    pub key: &'static str,
    pub desc: &'static str,
}

pub struct FooterGroup {
    pub name: &'static str,
    pub items: Vec<FooterItem>,
}

pub struct Footer<'a> {
    pub mode: AppMode,
    pub has_error: bool,
    pub status_message: Option<&'a str>,
    pub theme: &'a Theme,
}

fn item(key: &'static str, desc: &'static str) -> FooterItem {
    FooterItem { key, desc }
}

impl Footer<'_> {
    fn get_groups(&self) -> Vec<FooterGroup> {
        match self.mode {
            AppMode::Normal => {
                let mut groups = vec![
                    FooterGroup {
                        name: "CAPTURE",
                        items: vec![item("l", "listen"), item("w", "watch")],
                    },
                    FooterGroup {
                        name: "LOG",
                        items: vec![item("j/k", "scroll"), item("g/G", "top/end")],
                    },
                    FooterGroup {
                        name: "RUN",
                        items: vec![item(":", "command")],
                    },
                ];
                if self.has_error {
                    groups.insert(
                        0,
                        FooterGroup {
                            name: "ERROR",
                            items: vec![item("Esc", "dismiss")],
                        },
                    );
                }
                groups.push(FooterGroup {
                    name: "APP",
                    items: vec![item("?", "help"), item("q", "quit")],
                });
                groups
            }
            AppMode::CommandInput => vec![FooterGroup {
                name: "COMMAND",
                items: vec![item("Enter", "run"), item("Esc", "cancel")],
            }],
            AppMode::Help => vec![FooterGroup {
                name: "HELP",
                items: vec![item("Esc/?", "close")],
            }],
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;

        let status_span = match self.status_message {
            Some(msg) => Span::styled(format!("  {msg}  "), theme.status_info),
            None => Span::styled("  READY  ", theme.status_ready),
        };
        let mut spans = vec![status_span, Span::raw("  ")];

        let available_width = area.width.saturating_sub(4) as usize;
        let mut current_width = spans.iter().map(Span::width).sum::<usize>();

        for group in self.get_groups() {
            let Some(first) = group.items.first() else {
                continue;
            };
            if current_width + first.key.len() + first.desc.len() + 4 > available_width {
                break;
            }

            if area.width > 100 {
                spans.push(Span::styled(
                    format!("{}: ", group.name),
                    theme.footer_group_name,
                ));
                current_width += group.name.len() + 2;
            }

            for item in group.items {
                let key_str = format!(" {} ", item.key);
                let desc_str = format!(" {} ", item.desc);
                let item_width = key_str.len() + desc_str.len();
                if current_width + item_width + 1 > available_width {
                    break;
                }
                spans.push(Span::styled(key_str, theme.footer_segment_key));
                spans.push(Span::styled(desc_str, theme.footer_segment_val));
                spans.push(Span::raw(" "));
                current_width += item_width + 1;
            }
            spans.push(Span::raw("  "));
            current_width += 2;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}
