//! Error types for the tache API client.
//!
//! # Design
//! Every failure path ends in a single `ApiError`, and its `Display` output is
//! the human-readable message a front end shows as-is. `RequestFailed` keeps
//! the status code so callers can tell "not found" from other failures
//! without parsing text; everything else is surfaced through the message.

use thiserror::Error;

/// Errors returned by the session, auth and task clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The operation needs a session token and none is stored. Raised before
    /// any request leaves the client.
    #[error("not authenticated")]
    Unauthenticated,

    /// The server answered with a non-2xx status. `message` is the first entry
    /// of the server's `errors` list, or the operation's default message.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("unexpected response from server: {0}")]
    MalformedResponse(String),

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The session storage backend failed to read or write the token.
    #[error("session storage error: {0}")]
    Storage(String),

    /// Input rejected before sending, or an invalid configuration value.
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    /// The message a front end should show for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// True when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::RequestFailed { status: 404, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_displays_message_only() {
        let err = ApiError::RequestFailed {
            status: 400,
            message: "Titre requis".to_string(),
        };
        assert_eq!(err.to_string(), "Titre requis");
        assert_eq!(err.message(), "Titre requis");
    }

    #[test]
    fn not_found_detection() {
        let missing = ApiError::RequestFailed {
            status: 404,
            message: "gone".to_string(),
        };
        let other = ApiError::RequestFailed {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!other.is_not_found());
        assert!(!ApiError::Unauthenticated.is_not_found());
    }
}
