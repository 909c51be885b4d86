//! HTTP server for Folio.
//!
//! Maps routes and form fields onto [`folio_cms::Request`]s, keeps visitor
//! sessions behind a cookie, and renders [`folio_cms::Outcome`]s as HTML
//! pages, redirects, or document bodies.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod session;
pub mod views;

pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::FolioServer;
pub use session::SESSION_COOKIE;
