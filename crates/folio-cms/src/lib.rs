//! Folio service layer.
//!
//! [`Cms`] ties the stores together: every [`Request`] is checked by the
//! access gate against the visitor's [`SessionState`](folio_session::SessionState),
//! then dispatched to the document store, credential store and validators.
//! The result is an [`Outcome`] (a page, a redirect, or rendered document
//! content) that a transport layer turns into a response. The service never
//! parses HTTP itself.

pub mod cms;
pub mod config;
pub mod error;
pub mod outcome;
pub mod request;

pub use cms::{Cms, INDEX_PATH, LOGIN_PATH};
pub use config::{CmsConfig, Environment, ENV_VAR};
pub use error::{CmsError, CmsResult};
pub use outcome::{Outcome, Page, View, STATUS_OK, STATUS_UNPROCESSABLE};
pub use request::Request;
