//! Client-side checks for account forms

use crate::backend::BackendError;

/// Minimum accepted length of a new password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check that both password entries match
pub fn confirm_password(password: &str, confirm: &str) -> Result<(), BackendError> {
    if password != confirm {
        return Err(BackendError::Validation("Passwords do not match".into()));
    }
    Ok(())
}

/// Check a new password before sending a change request
pub fn check_new_password(password: &str, confirm: &str) -> Result<(), BackendError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(BackendError::Validation(format!(
            "Password must be at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }
    confirm_password(password, confirm)
}

/// Check that an email looks plausible before hitting the backend
pub fn check_email(email: &str) -> Result<(), BackendError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
    if !valid {
        return Err(BackendError::Validation(format!("Invalid email address: {}", email)));
    }
    Ok(())
}
