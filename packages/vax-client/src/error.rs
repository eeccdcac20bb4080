//! Error types for the backend client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Backend client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration error (unparseable base URL, client build failure)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `message` is whatever the backend explained, if anything.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// Parse error (2xx response with an unexpected body)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The human-readable message the backend attached to a rejection.
    ///
    /// Transport and parse failures have no server message; callers fall
    /// back to their own wording.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Shorthand used by tests and fakes to build a backend rejection.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Api {
            status,
            message: Some(message.into()),
        }
    }
}

/// Pull a display message out of a response body.
///
/// The backend answers either with `{"message": "..."}` or with a bare string
/// (sometimes JSON-quoted). Blank bodies yield `None`.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_json_object() {
        let body = r#"{"message": "Invalid OTP", "status": 400}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Invalid OTP"));
    }

    #[test]
    fn test_extract_message_from_plain_text() {
        assert_eq!(
            extract_message("Doctor added successfully").as_deref(),
            Some("Doctor added successfully")
        );
    }

    #[test]
    fn test_extract_message_from_json_string() {
        assert_eq!(
            extract_message(r#""Dose given""#).as_deref(),
            Some("Dose given")
        );
    }

    #[test]
    fn test_extract_message_blank_or_messageless() {
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message("   \n"), None);
        assert_eq!(extract_message(r#"{"error": "Bad Request"}"#), None);
        assert_eq!(extract_message(r#"{"message": ""}"#), None);
        assert_eq!(extract_message("[]"), None);
    }

    #[test]
    fn test_user_message_only_for_rejections() {
        let rejected = ApiError::rejected(409, "Email already registered");
        assert_eq!(rejected.user_message(), Some("Email already registered"));
        assert_eq!(rejected.status(), Some(409));

        let parse = ApiError::Parse("expected object".into());
        assert_eq!(parse.user_message(), None);
        assert_eq!(parse.status(), None);

        let silent = ApiError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(silent.user_message(), None);
        assert_eq!(silent.to_string(), "API error (500): no message");
    }
}
