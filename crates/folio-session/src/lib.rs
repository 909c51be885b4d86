//! Per-visitor session state for Folio.
//!
//! A [`SessionState`] is an explicit value: request handlers load it from
//! the [`SessionStore`], mutate it, and store it back. There is no
//! process-wide singleton.
//!
//! Flash messages are one-shot. [`SessionState::take_flash`] returns the
//! pending messages and clears them, and only page rendering calls it, so
//! each message is shown by exactly one rendered page.

pub mod state;
pub mod store;

pub use state::{Flash, SessionState};
pub use store::{SessionId, SessionStore};
