use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use rand::RngCore;

use crate::state::SessionState;

/// Number of random bytes in a session id.
const ID_BYTES: usize = 32;

/// Opaque, unguessable session identifier carried in the session cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random id (64 lowercase hex characters).
    pub fn generate() -> Self {
        let mut bytes = [0u8; ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Accept a cookie value only if it has the shape of a generated id.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == ID_BYTES * 2
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SessionId {
    // Only a prefix, so ids do not leak into logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({}..)", &self.0[..8.min(self.0.len())])
    }
}

/// In-process table of live sessions.
///
/// Handlers work on a copy: [`load`](Self::load) at the start of a request,
/// [`save`](Self::save) at the end. Two concurrent requests from the same
/// visitor therefore race, and the last save wins.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the session, or `None` if the id is unknown.
    pub fn load(&self, id: &SessionId) -> Option<SessionState> {
        self.sessions.read().expect("lock poisoned").get(id).cloned()
    }

    pub fn save(&self, id: &SessionId, state: SessionState) {
        self.sessions
            .write()
            .expect("lock poisoned")
            .insert(id.clone(), state);
    }

    /// Forget a session. Returns `true` if it existed.
    pub fn remove(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().expect("lock poisoned").remove(id).is_some();
        if removed {
            tracing::debug!(session = ?id, "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session_count", &self.len())
            .finish()
    }
}
