//! Foundation types for Folio.
//!
//! Every other Folio crate depends on `folio-types` for the identity of a
//! document: its [`DocumentName`] and the [`Extension`] derived from it.
//!
//! # Key Types
//!
//! - [`DocumentName`]: a validated flat file name inside the content directory
//! - [`Extension`]: the document kind derived from the name's suffix

pub mod document;
pub mod error;

pub use document::{DocumentName, Extension};
pub use error::TypeError;
