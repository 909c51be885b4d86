use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::credentials::CredentialStore;
use crate::error::{AuthError, AuthResult};

/// In-memory credential store.
///
/// Intended for tests and embedding. Credentials are held behind a
/// `RwLock` and lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<BTreeMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn usernames(&self) -> AuthResult<Vec<String>> {
        Ok(self.users.read().expect("lock poisoned").keys().cloned().collect())
    }

    fn password_hash(&self, username: &str) -> AuthResult<Option<String>> {
        Ok(self.users.read().expect("lock poisoned").get(username).cloned())
    }

    fn insert(&self, username: &str, password_hash: &str) -> AuthResult<()> {
        let mut users = self.users.write().expect("lock poisoned");
        if users.contains_key(username) {
            return Err(AuthError::UserExists(username.to_string()));
        }
        users.insert(username.to_string(), password_hash.to_string());
        Ok(())
    }
}
