//! Session cookies.
//!
//! The cookie carries only a [`SessionId`]; the state lives in the
//! process-wide [`SessionStore`]. A fresh id is issued whenever the signed-in
//! user changes, so an id seen before sign-in is never authenticated.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use folio_session::{SessionId, SessionState, SessionStore};

use crate::error::{ServerError, ServerResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "folio_session";

fn parse_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|part| {
            let (key, value) = part.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

/// The session id presented by the client, if well formed.
pub fn session_id(headers: &HeaderMap) -> Option<SessionId> {
    parse_cookie(headers, SESSION_COOKIE).and_then(SessionId::parse)
}

pub fn session_cookie(id: &SessionId) -> ServerResult<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={id}; HttpOnly; SameSite=Lax; Path=/"
    ))
    .map_err(|e| ServerError::Internal(e.to_string()))
}

/// One request's view of a visitor's session.
#[derive(Debug)]
pub struct Visit {
    /// The id the client sent, if it names a live session.
    known: Option<SessionId>,
    user_before: Option<String>,
    pub state: SessionState,
}

impl Visit {
    /// Load the session named by the request's cookie, or start a new one.
    pub fn begin(store: &SessionStore, headers: &HeaderMap) -> Self {
        let loaded = session_id(headers).and_then(|id| store.load(&id).map(|state| (id, state)));
        let (known, state) = match loaded {
            Some((id, state)) => (Some(id), state),
            None => (None, SessionState::new()),
        };
        Self {
            known,
            user_before: state.user().map(str::to_owned),
            state,
        }
    }

    /// Store the session back. Returns the cookie to set when the client
    /// must switch to a new id.
    pub fn finish(self, store: &SessionStore) -> ServerResult<Option<HeaderValue>> {
        let user_changed = self.state.user() != self.user_before.as_deref();
        match self.known {
            Some(id) if !user_changed => {
                if self.state == SessionState::default() {
                    store.remove(&id);
                } else {
                    store.save(&id, self.state);
                }
                Ok(None)
            }
            known => {
                if let Some(old) = known {
                    store.remove(&old);
                } else if self.state == SessionState::default() {
                    // Nothing worth remembering about this visitor yet.
                    return Ok(None);
                }
                let id = SessionId::generate();
                let cookie = session_cookie(&id)?;
                store.save(&id, self.state);
                Ok(Some(cookie))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn cookie_id(cookie: &HeaderValue) -> SessionId {
        let value = cookie.to_str().unwrap();
        let (pair, _) = value.split_once(';').unwrap();
        let (_, id) = pair.split_once('=').unwrap();
        SessionId::parse(id).unwrap()
    }

    #[test]
    fn parse_cookie_among_others() {
        let id = SessionId::generate();
        let headers = headers_with_cookie(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en"));
        assert_eq!(session_id(&headers), Some(id));
    }

    #[test]
    fn malformed_cookie_is_ignored() {
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=not-an-id"));
        assert_eq!(session_id(&headers), None);
        assert_eq!(session_id(&HeaderMap::new()), None);
    }

    #[test]
    fn cookie_attributes() {
        let id = SessionId::generate();
        let cookie = session_cookie(&id).unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with(&format!("{SESSION_COOKIE}={id};")));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
    }

    #[test]
    fn empty_anonymous_visit_is_not_stored() {
        let store = SessionStore::new();
        let visit = Visit::begin(&store, &HeaderMap::new());
        assert_eq!(visit.finish(&store).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn flash_starts_a_session() {
        let store = SessionStore::new();
        let mut visit = Visit::begin(&store, &HeaderMap::new());
        visit.state.flash_error("oops");
        let cookie = visit.finish(&store).unwrap().unwrap();

        let id = cookie_id(&cookie);
        assert_eq!(store.load(&id).unwrap().flash().error.as_deref(), Some("oops"));
    }

    #[test]
    fn known_session_keeps_its_id() {
        let store = SessionStore::new();
        let id = SessionId::generate();
        let mut state = SessionState::new();
        state.sign_in("bob");
        store.save(&id, state);

        let mut visit = Visit::begin(&store, &headers_with_cookie(&format!("{SESSION_COOKIE}={id}")));
        assert_eq!(visit.state.user(), Some("bob"));
        visit.state.flash_success("saved");
        assert_eq!(visit.finish(&store).unwrap(), None);
        assert_eq!(store.load(&id).unwrap().flash().success.as_deref(), Some("saved"));
    }

    #[test]
    fn spent_anonymous_session_is_dropped() {
        let store = SessionStore::new();
        let mut visit = Visit::begin(&store, &HeaderMap::new());
        visit.state.flash_error("oops");
        let cookie = visit.finish(&store).unwrap().unwrap();
        let id = cookie_id(&cookie);

        let mut visit = Visit::begin(&store, &headers_with_cookie(&format!("{SESSION_COOKIE}={id}")));
        assert_eq!(visit.state.take_flash().error.as_deref(), Some("oops"));
        assert_eq!(visit.finish(&store).unwrap(), None);
        assert!(store.load(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn sign_in_rotates_id() {
        let store = SessionStore::new();
        let id = SessionId::generate();
        store.save(&id, SessionState::new());

        let mut visit = Visit::begin(&store, &headers_with_cookie(&format!("{SESSION_COOKIE}={id}")));
        visit.state.sign_in("bob");
        let cookie = visit.finish(&store).unwrap().unwrap();

        let new_id = cookie_id(&cookie);
        assert_ne!(new_id, id);
        assert!(store.load(&id).is_none());
        assert_eq!(store.load(&new_id).unwrap().user(), Some("bob"));
    }

    #[test]
    fn unknown_id_gets_a_fresh_session() {
        let store = SessionStore::new();
        let stale = SessionId::generate();
        let mut visit = Visit::begin(&store, &headers_with_cookie(&format!("{SESSION_COOKIE}={stale}")));
        visit.state.sign_in("mallory");
        let cookie = visit.finish(&store).unwrap().unwrap();
        assert_ne!(cookie_id(&cookie), stale);
        assert!(store.load(&stale).is_none());
    }
}
