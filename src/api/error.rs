//! Error type surfaced by every remote call.

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed source error produced by a transport implementation.
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered 401. The stored credential has already been
    /// cleared and an `AuthEvent::AuthRequired` broadcast when this is returned.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Any other non-success status.
    #[error("Request failed ({status}): {body}")]
    Http { status: StatusCode, body: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(#[source] TransportSource),

    /// The response body was not the JSON we expected.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected locally, no request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether this is the distinguished authentication failure.
    pub fn is_authentication_required(&self) -> bool {
        matches!(self, ApiError::AuthenticationRequired)
    }

    /// HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::AuthenticationRequired => Some(StatusCode::UNAUTHORIZED),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_required_is_tagged() {
        assert!(ApiError::AuthenticationRequired.is_authentication_required());
        let http = ApiError::Http {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert!(!http.is_authentication_required());
    }

    #[test]
    fn test_status() {
        assert_eq!(
            ApiError::AuthenticationRequired.status(),
            Some(StatusCode::UNAUTHORIZED)
        );
        let http = ApiError::Http {
            status: StatusCode::NOT_FOUND,
            body: "Checklist not found".into(),
        };
        assert_eq!(http.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(ApiError::InvalidArgument("x".into()).status(), None);
    }

    #[test]
    fn test_display() {
        let http = ApiError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        assert_eq!(http.to_string(), "Request failed (500 Internal Server Error): boom");
        assert_eq!(
            ApiError::AuthenticationRequired.to_string(),
            "Authentication required"
        );
    }
}
