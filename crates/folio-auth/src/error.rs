use thiserror::Error;

/// Errors from credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A credential with this username already exists.
    #[error("user already exists: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The credential file could not be parsed or encoded.
    #[error("credential file error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for credential operations.
pub type AuthResult<T> = Result<T, AuthError>;
