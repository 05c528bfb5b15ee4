//! Configuration constants and validation functions for the extractor.

use std::path::Path;

use crate::error::{ExtractorError, Result};

/// Alias bound to the document's default namespace in lookup paths.
pub const NAMESPACE_ALIAS: &str = "ns";

/// Default destination directory for files extracted from archives.
pub const DEFAULT_EXTRACT_DIR: &str = "data";

/// Extension of source documents.
pub const XML_EXTENSION: &str = "xml";

/// Extension of source archives.
pub const ZIP_EXTENSION: &str = "zip";

/// Check whether `path` has the given extension, ignoring case.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use erknm_extractor::config::has_extension;
///
/// assert!(has_extension(Path::new("a.XML"), "xml"));
/// assert!(!has_extension(Path::new("a.txt"), "xml"));
/// assert!(!has_extension(Path::new("xml"), "xml"));
/// ```
#[must_use]
pub fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

/// Check whether an archive entry name ends in `.xml`, ignoring case.
#[must_use]
pub fn is_xml_entry_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".xml")
}

/// Validate that `path` exists.
///
/// # Returns
/// * `Ok(())` if the path exists
/// * `Err(ExtractorError::NotFound)` otherwise
pub fn validate_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ExtractorError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Validate that `path` carries the expected extension.
///
/// # Returns
/// * `Ok(())` if the extension matches (case-insensitive)
/// * `Err(ExtractorError::Format)` otherwise
pub fn validate_extension(path: &Path, expected: &str) -> Result<()> {
    if has_extension(path, expected) {
        Ok(())
    } else {
        Err(ExtractorError::format(
            path,
            format!("expected a .{expected} file"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_has_extension_case_insensitive() {
        assert!(has_extension(Path::new("data/28836821.xml"), "xml"));
        assert!(has_extension(Path::new("data/28836821.XmL"), "xml"));
        assert!(has_extension(Path::new("bundle.ZIP"), "zip"));
    }

    #[test]
    fn test_has_extension_rejects_other() {
        assert!(!has_extension(Path::new("data/28836821.json"), "xml"));
        assert!(!has_extension(Path::new("data/noext"), "xml"));
        assert!(!has_extension(Path::new("archive.xml.gz"), "xml"));
    }

    #[test]
    fn test_is_xml_entry_name() {
        assert!(is_xml_entry_name("a.xml"));
        assert!(is_xml_entry_name("nested/b.XML"));
        assert!(!is_xml_entry_name("c.txt"));
        assert!(!is_xml_entry_name("xml/"));
    }

    #[test]
    fn test_validate_exists_missing() {
        let err = validate_exists(Path::new("definitely/not/here.xml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension(Path::new("a.xml"), XML_EXTENSION).is_ok());
        let err = validate_extension(Path::new("a.zip"), XML_EXTENSION).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains(".xml"));
    }
}
