//! Transient notifications shown after an action

use std::fmt;

use crate::utils::errors::EventrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// Error toast for a failed action
    ///
    /// The server's own message wins when it sent one; local validation
    /// failures show their reason; everything else gets `fallback`.
    pub fn from_error(error: &EventrError, fallback: &str) -> Self {
        if let Some(server) = error.server_message() {
            return Self::error(server);
        }

        let message = match error {
            EventrError::InvalidInput(reason) | EventrError::PermissionDenied(reason) => reason.clone(),
            EventrError::NotAuthenticated => "Please log in first".to_string(),
            _ => fallback.to_string(),
        };
        Self::error(message)
    }

    pub fn is_error(&self) -> bool {
        self.kind == ToastKind::Error
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "[ok] {}", self.message),
            ToastKind::Error => write!(f, "[error] {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::ApiError;

    #[test]
    fn test_server_message_is_used_verbatim() {
        let error = EventrError::Api(ApiError::Validation("User already exists".into()));
        let toast = Toast::from_error(&error, "Signup failed");
        assert_eq!(toast.message, "User already exists");
        assert!(toast.is_error());
    }

    #[test]
    fn test_fallback_without_server_message() {
        let error = EventrError::Api(ApiError::Timeout);
        assert_eq!(Toast::from_error(&error, "Failed to load events").message, "Failed to load events");

        let empty = EventrError::Api(ApiError::Server { status: 500, message: String::new() });
        assert_eq!(Toast::from_error(&empty, "Failed").message, "Failed");
    }

    #[test]
    fn test_local_validation_reason() {
        let error = EventrError::InvalidInput("Full name is required".into());
        assert_eq!(Toast::from_error(&error, "Failed").message, "Full name is required");
    }

    #[test]
    fn test_display() {
        assert_eq!(Toast::success("Saved").to_string(), "[ok] Saved");
        assert_eq!(Toast::error("Nope").to_string(), "[error] Nope");
    }
}
