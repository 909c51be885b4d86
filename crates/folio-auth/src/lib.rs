//! Credential storage and password verification for Folio.
//!
//! Credentials map a case-sensitive username to an Argon2 password hash in
//! PHC string form. Credentials are created once and never mutated or
//! deleted.
//!
//! # Modules
//!
//! - [`password`]: hashing and verification
//! - [`credentials`]: the [`CredentialStore`] trait
//! - [`file`]: [`FileCredentialStore`], a TOML file rewritten on every add
//! - [`memory`]: [`InMemoryCredentialStore`] for tests and embedding

pub mod credentials;
pub mod error;
pub mod file;
pub mod memory;
pub mod password;

pub use credentials::CredentialStore;
pub use error::{AuthError, AuthResult};
pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use password::{hash_password, verify_password};
