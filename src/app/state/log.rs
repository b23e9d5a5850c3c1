use crate::domain::models::CommandLogEntry;

/// Displayed command log: always the last server snapshot, never merged.
///
/// `visible` is the number of rows the log pane can show; scrolling stops
/// once the last entry sits on the bottom row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogState {
    pub entries: Vec<CommandLogEntry>,
    pub scroll: u16,
}

impl LogState {
    pub fn replace(&mut self, entries: Vec<CommandLogEntry>, visible: u16) {
        self.entries = entries;
        self.clamp(visible);
    }

    #[must_use]
    pub fn max_scroll(&self, visible: u16) -> u16 {
        let hidden = self.entries.len().saturating_sub(usize::from(visible.max(1)));
        u16::try_from(hidden).unwrap_or(u16::MAX)
    }

    pub fn clamp(&mut self, visible: u16) {
        self.scroll = self.scroll.min(self.max_scroll(visible));
    }

    pub fn scroll_down(&mut self, amount: u16, visible: u16) {
        self.scroll = self
            .scroll
            .saturating_add(amount)
            .min(self.max_scroll(visible));
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_to_bottom(&mut self, visible: u16) {
        self.scroll = self.max_scroll(visible);
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
