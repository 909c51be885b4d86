//! Sign-up credential validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! username present, username free, password present, password long enough.

use crate::error::{Result, ValidationError};

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate a sign-up request against the set of existing usernames.
///
/// Usernames are compared case-sensitively. The password length counts
/// characters, not bytes, and includes surrounding whitespace.
pub fn validate_signup<'a, I>(username: &str, password: &str, existing: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameRequired);
    }

    if existing.into_iter().any(|taken| taken == username) {
        return Err(ValidationError::UsernameTaken);
    }

    if password.trim().is_empty() {
        return Err(ValidationError::PasswordRequired);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}
