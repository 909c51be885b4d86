use folio_types::DocumentName;

use crate::error::StoreResult;

/// Storage backend for named documents.
///
/// All implementations must satisfy these invariants:
/// - A name maps to at most one document.
/// - `create` fails with `AlreadyExists` rather than overwrite.
/// - `copy` derives its target with [`DocumentName::copy_name`] and never
///   overwrites an existing target.
/// - Reads reflect the backing storage as of the call; nothing is cached.
pub trait DocumentStore: Send + Sync {
    /// All document names, sorted.
    fn list(&self) -> StoreResult<Vec<DocumentName>>;

    /// Check whether a document exists.
    fn exists(&self, name: &DocumentName) -> StoreResult<bool>;

    /// Read a document's raw content.
    ///
    /// Returns `Err(NotFound)` if the document does not exist.
    fn read(&self, name: &DocumentName) -> StoreResult<Vec<u8>>;

    /// Replace a document's content, creating it if absent.
    fn write(&self, name: &DocumentName, content: &[u8]) -> StoreResult<()>;

    /// Create a new, empty document.
    fn create(&self, name: &DocumentName) -> StoreResult<()>;

    /// Delete a document. Returns `Err(NotFound)` if it does not exist.
    fn delete(&self, name: &DocumentName) -> StoreResult<()>;

    /// Copy a document to its derived copy name and return that name.
    fn copy(&self, name: &DocumentName) -> StoreResult<DocumentName>;
}
