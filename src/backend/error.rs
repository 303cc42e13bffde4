//! Error types for backend API integration

use thiserror::Error;

/// Errors that can occur when talking to the course backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// No learner is logged in
    #[error("Not logged in. Run `ccna-course login` first")]
    NotLoggedIn,

    /// No bearer token is stored for the learner
    #[error("No access token stored for {0}. Log in again")]
    MissingToken(String),

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Backend error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Base URL could not be parsed
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl BackendError {
    /// Check if this error is worth retrying by hand
    pub fn is_recoverable(&self) -> bool {
        match self {
            BackendError::RequestError(_) => true,
            BackendError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if this error requires logging in again
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            BackendError::NotLoggedIn
                | BackendError::MissingToken(_)
                | BackendError::ApiError { status: 401 | 403, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_recoverable() {
        let err = BackendError::ApiError { status: 503, message: "down".into() };
        assert!(err.is_recoverable());
        let err = BackendError::ApiError { status: 400, message: "bad".into() };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn unauthorized_requires_reauth() {
        assert!(BackendError::ApiError { status: 401, message: String::new() }.requires_reauth());
        assert!(BackendError::MissingToken("ana".into()).requires_reauth());
        assert!(!BackendError::Validation("x".into()).requires_reauth());
    }
}
