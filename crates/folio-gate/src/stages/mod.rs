//! Built-in guard stages.

pub mod authentication;

pub use authentication::{AuthenticationStage, SIGN_IN_REQUIRED};
