use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Characters that may never appear in a document name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0'];

/// Suffix appended to the base name when a document is copied.
const COPY_SUFFIX: &str = "_copy";

/// The kind of a document, derived from the last `.`-separated segment of
/// its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extension {
    /// `.txt`: served verbatim.
    Text,
    /// `.md`: rendered to HTML.
    Markdown,
    /// Anything else, including names without a dot.
    Unknown,
}

impl Extension {
    /// Classify a file name by its suffix.
    pub fn from_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, "txt")) => Self::Text,
            Some((_, "md")) => Self::Markdown,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// The identity of a document: a flat file name inside the content
/// directory.
///
/// A `DocumentName` can never address anything outside that directory. It
/// is non-empty, carries no path separators or NUL bytes, and does not start
/// with `.` (which also rules out `.` and `..`).
///
/// # Examples
///
/// ```
/// use folio_types::{DocumentName, Extension};
///
/// let name = DocumentName::parse("about.md").unwrap();
/// assert_eq!(name.extension(), Extension::Markdown);
/// assert_eq!(name.copy_name().as_str(), "about_copy.md");
/// assert!(DocumentName::parse("../etc/passwd").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentName(String);

impl DocumentName {
    /// Parse a raw name, rejecting anything that is not a plain file name.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let name = raw.into();
        if name.is_empty() {
            return Err(TypeError::EmptyName);
        }
        if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(TypeError::InvalidName {
                reason: format!("contains forbidden character: {ch:?}"),
                name,
            });
        }
        if name.starts_with('.') {
            return Err(TypeError::InvalidName {
                name,
                reason: "must not start with '.'".into(),
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> Extension {
        Extension::from_name(&self.0)
    }

    /// The name without its final `.suffix` (the whole name if it has none).
    pub fn base_name(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((base, _)) => base,
            None => &self.0,
        }
    }

    /// The final `.`-separated segment, if the name has one.
    pub fn suffix(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, suffix)| suffix)
    }

    /// The deterministic name given to a copy of this document:
    /// `base_copy.ext`, or `name_copy` when there is no extension.
    pub fn copy_name(&self) -> Self {
        match self.suffix() {
            Some(suffix) => Self(format!("{}{COPY_SUFFIX}.{suffix}", self.base_name())),
            None => Self(format!("{}{COPY_SUFFIX}", self.0)),
        }
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentName({:?})", self.0)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DocumentName> for String {
    fn from(name: DocumentName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extension_classification() {
        assert_eq!(Extension::from_name("a.txt"), Extension::Text);
        assert_eq!(Extension::from_name("a.md"), Extension::Markdown);
        assert_eq!(Extension::from_name("a.pdf"), Extension::Unknown);
        assert_eq!(Extension::from_name("README"), Extension::Unknown);
        assert_eq!(Extension::from_name("a.tar.md"), Extension::Markdown);
    }

    #[test]
    fn parse_accepts_plain_names() {
        assert!(DocumentName::parse("about.md").is_ok());
        assert!(DocumentName::parse("changes.txt").is_ok());
        assert!(DocumentName::parse("file-that-does-not-exist").is_ok());
        assert!(DocumentName::parse("with space.txt").is_ok());
    }

    #[test]
    fn parse_rejects_unsafe_names() {
        assert_eq!(DocumentName::parse(""), Err(TypeError::EmptyName));
        assert!(DocumentName::parse("a/b.txt").is_err());
        assert!(DocumentName::parse("a\\b.txt").is_err());
        assert!(DocumentName::parse("..").is_err());
        assert!(DocumentName::parse(".hidden").is_err());
        assert!(DocumentName::parse("nul\0.txt").is_err());
    }

    #[test]
    fn base_name_and_suffix() {
        let name = DocumentName::parse("about.md").unwrap();
        assert_eq!(name.base_name(), "about");
        assert_eq!(name.suffix(), Some("md"));

        let bare = DocumentName::parse("notes").unwrap();
        assert_eq!(bare.base_name(), "notes");
        assert_eq!(bare.suffix(), None);
    }

    #[test]
    fn copy_name_keeps_extension() {
        let name = DocumentName::parse("about.md").unwrap();
        assert_eq!(name.copy_name().as_str(), "about_copy.md");
        assert_eq!(name.copy_name().extension(), Extension::Markdown);

        let bare = DocumentName::parse("notes").unwrap();
        assert_eq!(bare.copy_name().as_str(), "notes_copy");
    }

    #[test]
    fn serde_rejects_invalid_names() {
        let ok: DocumentName = serde_json::from_str("\"hello.txt\"").unwrap();
        assert_eq!(ok.as_str(), "hello.txt");
        assert!(serde_json::from_str::<DocumentName>("\"../x\"").is_err());
    }

    proptest! {
        #[test]
        fn parsed_names_never_contain_separators(raw in "[a-z./\\\\]{0,12}") {
            if let Ok(name) = DocumentName::parse(raw) {
                prop_assert!(!name.as_str().contains('/'));
                prop_assert!(!name.as_str().contains('\\'));
                prop_assert!(!name.as_str().starts_with('.'));
            }
        }
    }
}
