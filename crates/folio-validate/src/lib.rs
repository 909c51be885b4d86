//! Input validation for Folio.
//!
//! Validators return `Ok(())` or a [`ValidationError`] whose `Display` is the
//! exact message shown to the user.
//!
//! # Modules
//!
//! - [`error`]: The [`ValidationError`] type
//! - [`names`]: New-document name rules
//! - [`signup`]: Sign-up username/password rules

pub mod error;
pub mod names;
pub mod signup;

pub use error::{Result, ValidationError};
pub use names::{validate_document_name, NameRules};
pub use signup::{validate_signup, MIN_PASSWORD_LEN};
