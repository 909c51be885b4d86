use thiserror::Error;

/// Fatal request failures.
///
/// Recoverable conditions (missing documents, name collisions, invalid
/// input, denied access) never surface here; they become flash messages or
/// re-rendered forms inside [`Cms`](crate::Cms).
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("store error: {0}")]
    Store(#[from] folio_store::StoreError),

    #[error("auth error: {0}")]
    Auth(#[from] folio_auth::AuthError),
}

pub type CmsResult<T> = Result<T, CmsError>;
