//! Error types for the client flows.

use forky_constant::messages;
use thiserror::Error;

/// Input rejected before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Repository field empty or whitespace only
    #[error("{}", messages::EMPTY_REPOSITORY)]
    EmptyRepository,

    /// Repository field neither a GitHub reference nor an http(s) URL
    #[error("{}", messages::INVALID_REPOSITORY)]
    InvalidRepository,
}

/// Coarse classification of [`ClientError`], one per user-visible category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    RateLimited,
    Network,
    Timeout,
    Application,
    Decode,
    Clipboard,
    Config,
}

/// Errors that can occur while talking to the backend or the host environment.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP 429
    #[error("{}", messages::RATE_LIMITED)]
    RateLimited,

    /// Any other non-success status
    #[error("{}", messages::NETWORK_NOT_OK)]
    Network { status: u16 },

    /// Connection or protocol failure before a status was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request deadline fired first
    #[error("request exceeded its deadline")]
    Timeout,

    /// Success status, but the payload carried an `error` field
    #[error("{0}")]
    Application(String),

    /// Body could not be decoded into the expected payload
    #[error("Invalid response payload: {0}")]
    Decode(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map a non-success HTTP status to its error.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            ClientError::RateLimited
        } else {
            ClientError::Network {
                status: status.as_u16(),
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::RateLimited => ErrorKind::RateLimited,
            ClientError::Network { .. } | ClientError::Transport(_) => ErrorKind::Network,
            ClientError::Timeout => ErrorKind::Timeout,
            ClientError::Application(_) => ErrorKind::Application,
            ClientError::Decode(_) => ErrorKind::Decode,
            ClientError::Clipboard(_) => ErrorKind::Clipboard,
            ClientError::Config(_) => ErrorKind::Config,
        }
    }

    /// Text shown in the chat transcript when a request ends with this error.
    pub fn chat_message(&self) -> String {
        match self {
            ClientError::Timeout => messages::TIMED_OUT.to_string(),
            ClientError::RateLimited => format!("Error: {}", messages::RATE_LIMITED),
            ClientError::Network { .. } | ClientError::Transport(_) => {
                format!("Error: {}", messages::NETWORK_NOT_OK)
            }
            ClientError::Application(message) if !message.trim().is_empty() => {
                format!("Error: {message}")
            }
            ClientError::Validation(e) => format!("Error: {e}"),
            _ => messages::GENERIC_FAILURE.to_string(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_429_is_rate_limited() {
        let err = ClientError::from_status(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(
            err.chat_message(),
            "Error: Rate limit exceeded. Please try again in a moment."
        );
    }

    #[test]
    fn other_statuses_are_network_errors() {
        for code in [400u16, 404, 500, 502, 503] {
            let err = ClientError::from_status(StatusCode::from_u16(code).unwrap());
            assert_eq!(err.kind(), ErrorKind::Network);
            assert_eq!(err.chat_message(), "Error: Network response was not ok");
        }
    }

    #[test]
    fn timeout_text_differs_from_network_text() {
        let timeout = ClientError::Timeout.chat_message();
        let network = ClientError::Network { status: 500 }.chat_message();
        assert_ne!(timeout, network);
        assert!(timeout.starts_with("The request took too long"));
    }

    #[test]
    fn application_error_carries_payload_message() {
        let err = ClientError::Application("repository too large".into());
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(err.chat_message(), "Error: repository too large");
    }

    #[test]
    fn empty_application_error_falls_back_to_generic() {
        let err = ClientError::Application("  ".into());
        assert_eq!(
            err.chat_message(),
            "Sorry, there was an error processing your request."
        );
    }

    #[test]
    fn decode_error_uses_generic_text() {
        let err = ClientError::Decode("expected value".into());
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(
            err.chat_message(),
            "Sorry, there was an error processing your request."
        );
    }

    #[test]
    fn validation_errors_display_user_text() {
        assert_eq!(
            ValidationError::EmptyRepository.to_string(),
            "Please enter a repository URL"
        );
        assert_eq!(
            ValidationError::InvalidRepository.to_string(),
            "Please enter a valid GitHub repository URL"
        );
    }
}
