#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    #[default]
    Unknown,
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderState {
    pub backend_url: String,
    pub connection: Connection,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            backend_url: crate::config::DEFAULT_BASE_URL.to_string(),
            connection: Connection::Unknown,
        }
    }
}

impl HeaderState {
    #[must_use]
    pub fn connection_text(&self) -> &'static str {
        match self.connection {
            Connection::Unknown => " CONNECTING ",
            Connection::Online => " ONLINE ",
            Connection::Offline => " OFFLINE ",
        }
    }
}
