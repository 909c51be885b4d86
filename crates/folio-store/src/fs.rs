use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use folio_types::DocumentName;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::DocumentStore;

/// Document store over a single flat directory.
///
/// Each document is one regular file named after the document. Directories
/// and hidden files inside the content directory are never listed. Writes,
/// creates, deletes and copies are serialized by a store-wide mutex so two
/// requests in the same process cannot interleave a read-modify-write;
/// other processes writing to the directory are not coordinated with.
pub struct FsDocumentStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FsDocumentStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "opened document store");
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// The content directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The on-disk path of a document.
    pub fn path_of(&self, name: &DocumentName) -> PathBuf {
        self.root.join(name.as_str())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no torn state.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_document(&self, name: &DocumentName) -> StoreResult<bool> {
        match fs::metadata(self.path_of(name)) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Create `name` with `content`, failing if anything already exists at
    /// that path.
    fn create_with(&self, name: &DocumentName, content: &[u8]) -> StoreResult<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.path_of(name));
        let mut file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(name.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content)?;
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn list(&self) -> StoreResult<Vec<DocumentName>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            // Hidden files fail to parse and are not documents.
            if let Ok(name) = DocumentName::parse(file_name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn exists(&self, name: &DocumentName) -> StoreResult<bool> {
        self.is_document(name)
    }

    fn read(&self, name: &DocumentName) -> StoreResult<Vec<u8>> {
        if !self.is_document(name)? {
            return Err(StoreError::NotFound(name.clone()));
        }
        let content = fs::read(self.path_of(name))?;
        debug!(document = %name, bytes = content.len(), "read document");
        Ok(content)
    }

    fn write(&self, name: &DocumentName, content: &[u8]) -> StoreResult<()> {
        let _guard = self.lock();
        fs::write(self.path_of(name), content)?;
        debug!(document = %name, bytes = content.len(), "wrote document");
        Ok(())
    }

    fn create(&self, name: &DocumentName) -> StoreResult<()> {
        let _guard = self.lock();
        self.create_with(name, &[])?;
        debug!(document = %name, "created document");
        Ok(())
    }

    fn delete(&self, name: &DocumentName) -> StoreResult<()> {
        let _guard = self.lock();
        if !self.is_document(name)? {
            return Err(StoreError::NotFound(name.clone()));
        }
        fs::remove_file(self.path_of(name))?;
        debug!(document = %name, "deleted document");
        Ok(())
    }

    fn copy(&self, name: &DocumentName) -> StoreResult<DocumentName> {
        let _guard = self.lock();
        if !self.is_document(name)? {
            return Err(StoreError::NotFound(name.clone()));
        }
        let target = name.copy_name();
        let content = fs::read(self.path_of(name))?;
        self.create_with(&target, &content)?;
        debug!(source = %name, target = %target, "copied document");
        Ok(target)
    }
}

impl std::fmt::Debug for FsDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsDocumentStore")
            .field("root", &self.root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> DocumentName {
        DocumentName::parse(raw).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, FsDocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::open(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_directory() {
        let (dir, store) = temp_store();
        assert!(dir.path().join("data").is_dir());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_is_sorted_and_skips_dirs_and_hidden_files() {
        let (_dir, store) = temp_store();
        store.write(&name("changes.txt"), b"").unwrap();
        store.write(&name("about.md"), b"").unwrap();
        fs::create_dir(store.root().join("nested")).unwrap();
        fs::write(store.root().join(".gitkeep"), b"").unwrap();

        let listed: Vec<String> = store.list().unwrap().into_iter().map(String::from).collect();
        assert_eq!(listed, vec!["about.md", "changes.txt"]);
    }

    #[test]
    fn write_then_read_roundtrip() {
        let (_dir, store) = temp_store();
        let doc = name("hello.txt");
        store.write(&doc, b"Oh hi there!").unwrap();
        assert!(store.exists(&doc).unwrap());
        assert_eq!(store.read(&doc).unwrap(), b"Oh hi there!");

        store.write(&doc, b"replaced").unwrap();
        assert_eq!(store.read(&doc).unwrap(), b"replaced");
    }

    #[test]
    fn read_missing_is_not_found() {
        let (_dir, store) = temp_store();
        let err = store.read(&name("missing.txt")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(n) if n.as_str() == "missing.txt"));
    }

    #[test]
    fn directory_is_not_a_document() {
        let (_dir, store) = temp_store();
        fs::create_dir(store.root().join("folder.txt")).unwrap();
        assert!(!store.exists(&name("folder.txt")).unwrap());
        assert!(matches!(store.read(&name("folder.txt")), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn create_makes_empty_document() {
        let (_dir, store) = temp_store();
        let doc = name("new.md");
        store.create(&doc).unwrap();
        assert_eq!(store.read(&doc).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn create_refuses_existing() {
        let (_dir, store) = temp_store();
        let doc = name("taken.txt");
        store.write(&doc, b"keep me").unwrap();
        assert!(matches!(store.create(&doc), Err(StoreError::AlreadyExists(_))));
        assert_eq!(store.read(&doc).unwrap(), b"keep me");
    }

    #[test]
    fn delete_removes_document() {
        let (_dir, store) = temp_store();
        let doc = name("gone.txt");
        store.create(&doc).unwrap();
        store.delete(&doc).unwrap();
        assert!(!store.exists(&doc).unwrap());
        assert!(matches!(store.delete(&doc), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn copy_clones_content() {
        let (_dir, store) = temp_store();
        store.write(&name("about.md"), b"X").unwrap();
        let copy = store.copy(&name("about.md")).unwrap();
        assert_eq!(copy.as_str(), "about_copy.md");
        assert_eq!(store.read(&copy).unwrap(), b"X");
        assert_eq!(store.read(&name("about.md")).unwrap(), b"X");
    }

    #[test]
    fn copy_collision_is_already_exists() {
        let (_dir, store) = temp_store();
        store.write(&name("about.md"), b"X").unwrap();
        store.copy(&name("about.md")).unwrap();
        store.write(&name("about_copy.md"), b"edited").unwrap();

        let err = store.copy(&name("about.md")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(n) if n.as_str() == "about_copy.md"));
        assert_eq!(store.read(&name("about_copy.md")).unwrap(), b"edited");
    }

    #[test]
    fn copy_missing_source_is_not_found() {
        let (_dir, store) = temp_store();
        assert!(matches!(store.copy(&name("nope.txt")), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn recoverable_classification() {
        assert!(StoreError::NotFound(name("a.txt")).is_recoverable());
        assert!(StoreError::AlreadyExists(name("a.txt")).is_recoverable());
        assert!(!StoreError::Io(io::Error::other("disk")).is_recoverable());
    }
}
