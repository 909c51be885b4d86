use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("document name must not be empty")]
    EmptyName,

    #[error("invalid document name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}
