use crate::app::recovery::get_suggestions;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub severity: ErrorSeverity,
    pub suggestions: Vec<String>,
}

impl ErrorState {
    #[must_use]
    pub fn new(message: String, severity: ErrorSeverity) -> Self {
        Self {
            suggestions: get_suggestions(&message),
            message,
            timestamp: Local::now(),
            severity,
        }
    }
}
