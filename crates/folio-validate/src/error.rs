//! Error types for validation.

use thiserror::Error;

/// A rejected input. The `Display` output is user-facing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A name is required")]
    NameRequired,

    #[error("A name may not contain '/' or '\\'")]
    PathSeparator,

    /// The extension is missing or not in the allowed set.
    #[error("A valid extension is required: {} (e.g. {example})", .allowed.join(" or "))]
    InvalidExtension {
        allowed: Vec<String>,
        example: String,
    },

    #[error("A username is required")]
    UsernameRequired,

    #[error("Sorry - the username has already been taken")]
    UsernameTaken,

    #[error("A password is required")]
    PasswordRequired,

    #[error("The password must consist of at least {min} characters (numbers, letters or symbols)")]
    PasswordTooShort { min: usize },
}

/// Convenience type alias for validation results.
pub type Result<T> = std::result::Result<T, ValidationError>;
