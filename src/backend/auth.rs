//! Bearer token storage using the system keyring

use keyring::Entry;

use super::error::BackendError;

/// Service name for keyring storage
const SERVICE_NAME: &str = "ccna-course";

/// Stores the backend access token per learner
pub struct TokenStore;

impl TokenStore {
    fn entry(username: &str) -> Result<Entry, BackendError> {
        Entry::new(SERVICE_NAME, username).map_err(|e| BackendError::KeyringError(e.to_string()))
    }

    /// Get the token stored for a learner
    pub fn get_token(username: &str) -> Result<String, BackendError> {
        Self::entry(username)?.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => BackendError::MissingToken(username.to_string()),
            _ => BackendError::KeyringError(e.to_string()),
        })
    }

    /// Store a learner's token
    pub fn set_token(username: &str, token: &str) -> Result<(), BackendError> {
        if token.trim().is_empty() {
            return Err(BackendError::Validation("Empty access token".into()));
        }
        Self::entry(username)?
            .set_password(token)
            .map_err(|e| BackendError::KeyringError(e.to_string()))
    }

    /// Delete a learner's token; a missing entry is not an error
    pub fn delete_token(username: &str) -> Result<(), BackendError> {
        match Self::entry(username)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(BackendError::KeyringError(e.to_string())),
        }
    }

    /// Mask a token for display (show first and last 4 chars)
    pub fn mask_token(token: &str) -> String {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 12 {
            return "*".repeat(chars.len());
        }
        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    }
}
