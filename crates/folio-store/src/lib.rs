//! Directory-backed document storage for Folio.
//!
//! A document is a flat file inside the content directory; its file name is
//! its identity. The store owns document content exclusively: no other
//! component caches it.
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`FsDocumentStore`] -- one file per document in a single directory
//!
//! # Design Rules
//!
//! 1. No in-memory cache: every call re-reads the directory.
//! 2. `create` and `copy` never overwrite an existing document.
//! 3. Mutations are serialized within the process.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsDocumentStore;
pub use traits::DocumentStore;
