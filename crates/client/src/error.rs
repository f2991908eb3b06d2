//! Errors returned by the API client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Fallback message shown when the server did not explain a failure.
const GENERIC_MESSAGE: &str = "Something went wrong, please try again";

/// Errors that can occur when talking to the Saho API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (DNS, TLS, connection, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Authentication failed (401) and could not be recovered by a refresh.
    #[error("Unauthorized{}", suffix(.message.as_deref()))]
    Unauthorized { message: Option<String> },

    /// The authenticated user may not perform this action (403).
    #[error("Forbidden{}", suffix(.message.as_deref()))]
    Forbidden { message: Option<String> },

    /// Resource not found (404).
    #[error("Not found{}", suffix(.message.as_deref()))]
    NotFound { message: Option<String> },

    /// Rate limited by the server (429).
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Other 4xx, typically server-side field validation.
    #[error("Request rejected ({status}){}", suffix(.message.as_deref()))]
    Validation {
        status: u16,
        message: Option<String>,
    },

    /// 5xx from the server.
    #[error("Server error ({status}){}", suffix(.message.as_deref()))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A token endpoint answered without a token.
    #[error("Response did not contain an access token")]
    MissingToken,

    /// The stored token cannot be sent as a header value.
    #[error("Access token is not a valid header value")]
    InvalidToken,

    /// A URL could not be built from the base URL and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An upload could not be read or encoded.
    #[error("Invalid attachment: {0}")]
    Attachment(String),
}

fn suffix(message: Option<&str>) -> String {
    message.map_or_else(String::new, |m| format!(": {m}"))
}

/// Error bodies come in two shapes: `{"error": "..."}` from the API's own
/// handlers and `{"message": "..." | [...]}` from its validation layer.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<MessageField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

/// Extract a human-readable message from an error response body.
fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = parsed.error.or_else(|| match parsed.message? {
        MessageField::One(message) => Some(message),
        MessageField::Many(messages) if !messages.is_empty() => Some(messages.join("; ")),
        MessageField::Many(_) => None,
    })?;
    let trimmed = message.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ApiError {
    /// Build an error from a non-success response, consuming its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Self::RateLimited(retry_after);
        }

        let body = response.text().await.unwrap_or_default();
        Self::from_status(status, &body)
    }

    /// Classify a status code and body.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized { message },
            StatusCode::FORBIDDEN => Self::Forbidden { message },
            StatusCode::NOT_FOUND => Self::NotFound { message },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(60),
            s if s.is_server_error() => Self::Server {
                status: s.as_u16(),
                message,
            },
            s => Self::Validation {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// HTTP status associated with this error, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::RateLimited(_) => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Validation { status, .. } | Self::Server { status, .. } => {
                StatusCode::from_u16(*status).ok()
            }
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Whether this is an authentication failure.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Message supplied by the server, when there was one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Best-effort message to show an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            Self::Transport(_) => "Unable to reach the server, check your connection".to_string(),
            Self::Unauthorized { .. } => "Your session has expired, please log in again".to_string(),
            Self::Forbidden { .. } => "You are not allowed to perform this action".to_string(),
            Self::RateLimited(secs) => format!("Too many requests, retry in {secs} seconds"),
            _ => GENERIC_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_shapes() {
        assert_eq!(
            extract_message(r#"{"error":"Email déjà utilisé"}"#).as_deref(),
            Some("Email déjà utilisé")
        );
        assert_eq!(
            extract_message(r#"{"message":["email must be an email","fullName is required"]}"#)
                .as_deref(),
            Some("email must be an email; fullName is required")
        );
        assert_eq!(
            extract_message(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(extract_message(r#"{"error":"  "}"#), None);
        assert_eq!(extract_message("<html>502</html>"), None);
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn test_from_status_classification() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, ""),
            ApiError::Forbidden { message: None }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"error":"bad"}"#),
            ApiError::Validation { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::Server { status: 502, .. }
        ));
    }

    #[test]
    fn test_display_includes_server_message() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error":"name is required"}"#);
        assert_eq!(err.to_string(), "Request rejected (400): name is required");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error":"Budget invalide"}"#);
        assert_eq!(err.user_message(), "Budget invalide");

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert_eq!(err.user_message(), GENERIC_MESSAGE);

        assert_eq!(ApiError::MissingToken.user_message(), GENERIC_MESSAGE);
        assert_eq!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").status(), Some(StatusCode::UNAUTHORIZED));
    }
}
