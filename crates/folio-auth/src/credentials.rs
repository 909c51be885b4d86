use crate::error::AuthResult;
use crate::password::verify_password;

/// Storage backend for username → password-hash credentials.
///
/// Implementations must be thread-safe and must never overwrite an existing
/// credential: `insert` fails with [`AuthError::UserExists`] instead.
///
/// [`AuthError::UserExists`]: crate::AuthError::UserExists
pub trait CredentialStore: Send + Sync {
    /// All usernames, sorted.
    fn usernames(&self) -> AuthResult<Vec<String>>;

    /// The stored hash for `username`, or `Ok(None)` if unknown.
    fn password_hash(&self, username: &str) -> AuthResult<Option<String>>;

    /// Persist a new credential.
    fn insert(&self, username: &str, password_hash: &str) -> AuthResult<()>;

    /// Check a (username, password) pair. Unknown users never verify.
    fn verify(&self, username: &str, password: &str) -> AuthResult<bool> {
        Ok(self
            .password_hash(username)?
            .is_some_and(|hash| verify_password(&hash, password)))
    }
}
