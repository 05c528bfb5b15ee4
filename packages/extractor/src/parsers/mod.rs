//! Document parsers, one per document kind.
//!
//! Every parser is a fixed table of named sections. Each section is a plain
//! function of the root element and the document's namespace table, so
//! sections are independent: a missing element degrades one section to an
//! empty value without touching the others.

mod knm;
mod pv;

use std::path::Path;

use roxmltree::Node;
use tracing::debug;

use crate::error::Result;
use crate::loader::{DocumentLoader, FileLoader, ParsedDocument};
use crate::types::{DocumentKind, ExtractionResult, Section};
use crate::xml::NamespaceTable;

pub use knm::KnmParser;
pub use pv::PvParser;

/// Function extracting one section from a document root.
pub type SectionFn = fn(Node<'_, '_>, &NamespaceTable) -> Section;

/// A named section of a document parser.
#[derive(Clone, Copy)]
pub struct SectionSpec {
    /// Key of the section in the extraction result.
    pub name: &'static str,

    /// Extraction function.
    pub extract: SectionFn,
}

impl SectionSpec {
    #[must_use]
    pub const fn new(name: &'static str, extract: SectionFn) -> Self {
        Self { name, extract }
    }
}

/// Trait for document parsers.
///
/// Implementors list their sections; loading, parsing and assembling the
/// result are shared.
pub trait DocumentParser: Send + Sync {
    /// The document kind this parser handles.
    fn kind(&self) -> DocumentKind;

    /// Sections extracted by this parser, in output order.
    fn sections(&self) -> &'static [SectionSpec];

    /// Assemble the extraction result from an already parsed document.
    fn parse_document(&self, doc: &ParsedDocument<'_>) -> ExtractionResult {
        let root = doc.root();
        let ns = doc.namespaces();
        let mut result = ExtractionResult::new();

        for spec in self.sections() {
            let section = (spec.extract)(root, ns);
            if section.is_empty() {
                debug!(kind = %self.kind(), section = spec.name, "Section is empty");
            }
            result.insert(spec.name, section);
        }

        result
    }

    /// Load `path` through `loader` and extract it.
    ///
    /// # Errors
    /// Propagates loader errors and `XmlParse` for malformed documents.
    fn parse_with(&self, loader: &dyn DocumentLoader, path: &Path) -> Result<ExtractionResult> {
        let source = loader.load(path)?;
        let doc = source.parse()?;
        Ok(self.parse_document(&doc))
    }

    /// Load `path` from the filesystem and extract it.
    fn parse(&self, path: &Path) -> Result<ExtractionResult> {
        self.parse_with(&FileLoader, path)
    }
}

/// Get the parser for a document-kind key.
///
/// # Errors
/// `ExtractorError::UnknownKind` for any key other than `knm` or `pv`.
///
/// # Examples
/// ```
/// use erknm_extractor::parsers::{get_parser, DocumentParser};
/// use erknm_extractor::types::DocumentKind;
///
/// assert_eq!(get_parser("knm").unwrap().kind(), DocumentKind::Knm);
/// assert!(get_parser("unknown").is_err());
/// ```
pub fn get_parser(kind: &str) -> Result<Box<dyn DocumentParser>> {
    Ok(parser_for(kind.parse()?))
}

/// Get the parser for a known document kind.
#[must_use]
pub fn parser_for(kind: DocumentKind) -> Box<dyn DocumentParser> {
    match kind {
        DocumentKind::Knm => Box::new(KnmParser),
        DocumentKind::Pv => Box::new(PvParser),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ExtractorError};
    use crate::loader::XmlSource;

    /// Serves a fixed document for any path.
    struct StaticLoader(&'static str);

    impl DocumentLoader for StaticLoader {
        fn load(&self, path: &Path) -> Result<XmlSource> {
            Ok(XmlSource::new(path, self.0))
        }
    }

    #[test]
    fn test_get_parser_known_kinds() {
        assert_eq!(get_parser("knm").unwrap().kind(), DocumentKind::Knm);
        assert_eq!(get_parser("pv").unwrap().kind(), DocumentKind::Pv);
    }

    #[test]
    fn test_get_parser_unknown_kind() {
        let err = get_parser("unknown").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownKind);
        assert!(matches!(err, ExtractorError::UnknownKind(k) if k == "unknown"));
    }

    #[test]
    fn test_parse_with_custom_loader() {
        let loader = StaticLoader(r#"<KNM xmlns="urn:erknm" DATE_START="2024-01-01"/>"#);
        let result = KnmParser
            .parse_with(&loader, Path::new("memory.xml"))
            .unwrap();

        let dates = result.get("knm_date").and_then(Section::as_attributes).unwrap();
        assert_eq!(dates.get("DATE_START").map(String::as_str), Some("2024-01-01"));
    }

    #[test]
    fn test_parse_with_malformed_document() {
        let loader = StaticLoader("<KNM>");
        let err = KnmParser
            .parse_with(&loader, Path::new("memory.xml"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_section_names_unique() {
        for kind in DocumentKind::ALL {
            let parser = parser_for(kind);
            let mut names: Vec<_> = parser.sections().iter().map(|s| s.name).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate section in {kind}");
        }
    }
}
