use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::credentials::CredentialStore;
use crate::error::{AuthError, AuthResult};

/// On-disk layout of the credential file.
///
/// ```toml
/// [users]
/// bob = "$argon2id$v=19$..."
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialFile {
    #[serde(default)]
    users: BTreeMap<String, String>,
}

/// Credentials persisted in a TOML file.
///
/// The file is read in full on every call and rewritten in full on every
/// insert; nothing is cached between calls. A missing file is an empty
/// mapping. Inserts hold a mutex across the read-modify-write cycle.
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AuthResult<CredentialFile> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CredentialFile::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text).map_err(|e| AuthError::Serialization(e.to_string()))
    }

    fn save(&self, file: &CredentialFile) -> AuthResult<()> {
        let text = toml::to_string(file).map_err(|e| AuthError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), users = file.users.len(), "wrote credential file");
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn usernames(&self) -> AuthResult<Vec<String>> {
        Ok(self.load()?.users.into_keys().collect())
    }

    fn password_hash(&self, username: &str) -> AuthResult<Option<String>> {
        Ok(self.load()?.users.remove(username))
    }

    fn insert(&self, username: &str, password_hash: &str) -> AuthResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.load()?;
        if file.users.contains_key(username) {
            return Err(AuthError::UserExists(username.to_string()));
        }
        file.users.insert(username.to_string(), password_hash.to_string());
        self.save(&file)?;
        info!(user = username, "added credential");
        Ok(())
    }
}

impl std::fmt::Debug for FileCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCredentialStore")
            .field("path", &self.path)
            .finish()
    }
}
