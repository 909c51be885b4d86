use serde::{Deserialize, Serialize};

/// Pending one-shot notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            error: None,
            success: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }

    /// Return the pending messages and leave this flash empty.
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }
}

/// Everything Folio remembers about one visitor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    user: Option<String>,
    flash: Flash,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The signed-in username, `None` when anonymous.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_in(&mut self, username: impl Into<String>) {
        self.user = Some(username.into());
    }

    /// Drop every attribute: identity and pending flash.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Set the pending error message, replacing any earlier one.
    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.flash.error = Some(message.into());
    }

    /// Set the pending success message, replacing any earlier one.
    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.flash.success = Some(message.into());
    }

    /// Peek at pending messages without consuming them.
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    /// Consume pending messages.
    pub fn take_flash(&mut self) -> Flash {
        self.flash.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_anonymous_and_empty() {
        let session = SessionState::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.user(), None);
        assert!(session.flash().is_empty());
    }

    #[test]
    fn sign_in_sets_user() {
        let mut session = SessionState::new();
        session.sign_in("bob");
        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some("bob"));
    }

    #[test]
    fn flash_is_consumed_once() {
        let mut session = SessionState::new();
        session.flash_success("Welcome!");

        let first = session.take_flash();
        assert_eq!(first, Flash::success("Welcome!"));

        let second = session.take_flash();
        assert!(second.is_empty());
    }

    #[test]
    fn later_flash_replaces_earlier() {
        let mut session = SessionState::new();
        session.flash_error("first");
        session.flash_error("second");
        assert_eq!(session.take_flash(), Flash::error("second"));
    }

    #[test]
    fn clear_drops_everything() {
        let mut session = SessionState::new();
        session.sign_in("bob");
        session.flash_error("pending");
        session.clear();
        assert_eq!(session, SessionState::default());
    }
}
