//! Error handling for EVENTR
//!
//! This module defines the main error types used throughout the client
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the EVENTR client
#[derive(Error, Debug)]
pub enum EventrError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failures talking to the remote EVENTR API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message sent back by the server, if the failure carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(message)
            | ApiError::Validation(message)
            | ApiError::NotFound(message)
            | ApiError::Server { message, .. } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Result type alias for EVENTR operations
pub type Result<T> = std::result::Result<T, EventrError>;

/// Result type alias for raw API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl EventrError {
    /// Message sent back by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            EventrError::Api(e) => e.server_message(),
            _ => None,
        }
    }

    /// Check if the error is recoverable by re-triggering the action
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventrError::Api(ApiError::Transport(_)) => true,
            EventrError::Api(ApiError::Timeout) => true,
            EventrError::Api(ApiError::Server { .. }) => true,
            EventrError::Api(_) => false,
            EventrError::Config(_) => false,
            EventrError::ConfigSource(_) => false,
            EventrError::PermissionDenied(_) => false,
            EventrError::NotAuthenticated => false,
            EventrError::Session(_) => false,
            EventrError::Serialization(_) => false,
            EventrError::Io(_) => true,
            EventrError::UrlParse(_) => false,
            EventrError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventrError::Config(_) | EventrError::ConfigSource(_) => ErrorSeverity::Critical,
            EventrError::Session(_) => ErrorSeverity::Critical,
            EventrError::PermissionDenied(_) => ErrorSeverity::Warning,
            EventrError::NotAuthenticated => ErrorSeverity::Warning,
            EventrError::Api(ApiError::Unauthorized(_)) => ErrorSeverity::Warning,
            EventrError::Api(ApiError::Validation(_)) => ErrorSeverity::Info,
            EventrError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_exposed() {
        let err = EventrError::Api(ApiError::Validation("User already exists".to_string()));
        assert_eq!(err.server_message(), Some("User already exists"));
        assert_eq!(err.to_string(), "API error: User already exists");
    }

    #[test]
    fn test_empty_server_message_is_hidden() {
        let err = ApiError::Server { status: 500, message: String::new() };
        assert_eq!(err.server_message(), None);
        assert_eq!(ApiError::Timeout.server_message(), None);
    }

    #[test]
    fn test_classification() {
        assert!(EventrError::Api(ApiError::Timeout).is_recoverable());
        assert!(!EventrError::NotAuthenticated.is_recoverable());
        assert_eq!(EventrError::Config("x".into()).severity(), ErrorSeverity::Critical);
        assert_eq!(
            EventrError::Api(ApiError::Unauthorized("no".into())).severity(),
            ErrorSeverity::Warning
        );
    }
}
