use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error! status: {}{}", .status.as_u16(), render_detail(.message))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request failed: {message}")]
    Request { message: String },
    #[error("invalid response: {message}")]
    Decode { message: String },
}

impl BackendError {
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn render_detail(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode {
                message: err.to_string(),
            }
        } else {
            BackendError::Request {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = BackendError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

        let err = BackendError::Http {
            status: StatusCode::BAD_REQUEST,
            message: Some("Unknown command: dance".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 400: Unknown command: dance"
        );
    }
}
