//! New-document name validation.
//!
//! A proposed name is valid when, after trimming:
//! - it is non-empty
//! - it contains no `/` or `\`
//! - it has exactly one `.`, with a non-empty base before it
//! - the extension after the `.` is one of the configured extensions
//!
//! Validation does not check whether the name is already taken; that is the
//! document store's job at creation time.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Extensions accepted for new documents unless configured otherwise.
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md"];

/// Configurable rules for new document names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRules {
    /// Accepted extensions, without the leading dot, in display order.
    pub allowed_extensions: Vec<String>,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl NameRules {
    fn invalid_extension(&self) -> ValidationError {
        let example = match self.allowed_extensions.first() {
            Some(ext) => format!("about.{ext}"),
            None => "about".to_string(),
        };
        ValidationError::InvalidExtension {
            allowed: self.allowed_extensions.clone(),
            example,
        }
    }
}

/// Validate a proposed new document name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use folio_validate::{validate_document_name, NameRules};
///
/// let rules = NameRules::default();
/// assert!(validate_document_name("notes.md", &rules).is_ok());
/// assert!(validate_document_name("notes", &rules).is_err());
/// assert!(validate_document_name("notes.pdf", &rules).is_err());
/// ```
pub fn validate_document_name(raw: &str, rules: &NameRules) -> Result<()> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if name.contains('/') || name.contains('\\') {
        return Err(ValidationError::PathSeparator);
    }

    let segments: Vec<&str> = name.split('.').collect();
    let [base, extension] = segments.as_slice() else {
        return Err(rules.invalid_extension());
    };

    if base.trim().is_empty()
        || !rules.allowed_extensions.iter().any(|allowed| allowed == extension)
    {
        return Err(rules.invalid_extension());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn check(raw: &str) -> Result<()> {
        validate_document_name(raw, &NameRules::default())
    }

    #[test]
    fn accepts_allowed_extensions() {
        assert!(check("file.txt").is_ok());
        assert!(check("file.md").is_ok());
        assert!(check("  padded.md  ").is_ok());
        assert!(check("with space.txt").is_ok());
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(check(""), Err(ValidationError::NameRequired));
        assert_eq!(check("   "), Err(ValidationError::NameRequired));
    }

    #[test]
    fn rejects_missing_or_unknown_extension() {
        assert!(matches!(check("file"), Err(ValidationError::InvalidExtension { .. })));
        assert!(matches!(check("file.pdf"), Err(ValidationError::InvalidExtension { .. })));
        assert!(matches!(check("file."), Err(ValidationError::InvalidExtension { .. })));
    }

    #[test]
    fn empty_base_is_an_invalid_extension() {
        assert!(matches!(check(".txt"), Err(ValidationError::InvalidExtension { .. })));
        assert!(matches!(check(" .md"), Err(ValidationError::InvalidExtension { .. })));
    }

    #[test]
    fn rejects_multiple_dots() {
        assert!(matches!(check("archive.tar.md"), Err(ValidationError::InvalidExtension { .. })));
        assert!(matches!(check("a..txt"), Err(ValidationError::InvalidExtension { .. })));
    }

    #[test]
    fn rejects_path_separators() {
        assert_eq!(check("../secret.txt"), Err(ValidationError::PathSeparator));
        assert_eq!(check("dir\\file.md"), Err(ValidationError::PathSeparator));
    }

    #[test]
    fn extension_message_lists_allowed() {
        let err = check("file.pdf").unwrap_err();
        assert_eq!(
            err.to_string(),
            "A valid extension is required: txt or md (e.g. about.txt)"
        );
    }

    #[test]
    fn custom_rules() {
        let rules = NameRules {
            allowed_extensions: vec!["md".into()],
        };
        assert!(validate_document_name("notes.md", &rules).is_ok());
        let err = validate_document_name("notes.txt", &rules).unwrap_err();
        assert_eq!(err.to_string(), "A valid extension is required: md (e.g. about.md)");
    }

    proptest! {
        #[test]
        fn simple_names_with_allowed_extension_pass(
            base in "[a-zA-Z0-9_-]{1,16}",
            ext in prop::sample::select(vec!["txt", "md"]),
        ) {
            let raw = format!("{base}.{ext}");
            prop_assert!(check(&raw).is_ok());
        }

        #[test]
        fn names_without_a_dot_fail(base in "[a-zA-Z0-9_-]{1,16}") {
            prop_assert!(check(&base).is_err());
        }
    }
}
