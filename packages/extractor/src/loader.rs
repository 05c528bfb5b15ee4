//! Loading source documents.
//!
//! A [`DocumentLoader`] turns a path into an [`XmlSource`]; parsing the source
//! yields a [`ParsedDocument`] that pairs the tree with the namespace table
//! resolved from its own root. Parsers only ever see the two together.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use crate::config::{validate_exists, validate_extension, XML_EXTENSION};
use crate::error::{ExtractorError, Result};
use crate::xml::NamespaceTable;

/// Raw XML text read from a path.
#[derive(Debug, Clone)]
pub struct XmlSource {
    path: PathBuf,
    text: String,
}

impl XmlSource {
    /// Wrap already-read XML text.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse the text into a tree and resolve its namespace table.
    ///
    /// A `<!DOCTYPE ...>` is accepted; its DTD is not used for validation.
    ///
    /// # Errors
    /// `ExtractorError::XmlParse` if the text is not well-formed XML.
    pub fn parse(&self) -> Result<ParsedDocument<'_>> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(&self.text, options).map_err(|source| {
            ExtractorError::XmlParse {
                path: self.path.clone(),
                source,
            }
        })?;
        let namespaces = NamespaceTable::from_root(doc.root_element());
        debug!(
            path = %self.path.display(),
            namespace = namespaces.default_namespace().unwrap_or(""),
            "Parsed document"
        );
        Ok(ParsedDocument { doc, namespaces })
    }
}

/// A parsed document together with the namespace table of its root.
#[derive(Debug)]
pub struct ParsedDocument<'input> {
    doc: Document<'input>,
    namespaces: NamespaceTable,
}

impl<'input> ParsedDocument<'input> {
    /// The document's root element.
    #[must_use]
    pub fn root(&self) -> Node<'_, 'input> {
        self.doc.root_element()
    }

    #[must_use]
    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }
}

/// Capability to fetch a document's XML text by path.
pub trait DocumentLoader {
    /// Load the XML source at `path`.
    ///
    /// # Errors
    /// `NotFound` if the path does not exist, `Format` if it is not an XML
    /// file.
    fn load(&self, path: &Path) -> Result<XmlSource>;
}

/// Loads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<XmlSource> {
        validate_exists(path)?;
        validate_extension(path, XML_EXTENSION)?;

        let bytes = fs::read(path)?;
        let text = decode_xml(path, &bytes)?;

        Ok(XmlSource::new(path, text))
    }
}

/// Decode raw XML bytes to text.
///
/// A byte-order mark takes precedence, then the `encoding` of the XML
/// declaration; without either the content must be UTF-8.
///
/// # Errors
/// `ExtractorError::Format` for an unknown encoding label or bytes that are
/// invalid in the chosen encoding.
pub fn decode_xml(path: &Path, bytes: &[u8]) -> Result<String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => {
            let encoding = match declared_encoding(bytes) {
                Some(label) => Encoding::for_label(label).ok_or_else(|| {
                    ExtractorError::format(
                        path,
                        format!("unsupported encoding '{}'", String::from_utf8_lossy(label)),
                    )
                })?,
                None => UTF_8,
            };
            (encoding, bytes)
        }
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| {
            ExtractorError::format(path, format!("content is not valid {}", encoding.name()))
        })?;

    if encoding != UTF_8 {
        debug!(path = %path.display(), encoding = encoding.name(), "Decoded document");
    }
    Ok(text)
}

/// Read the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    let end = rest.windows(2).position(|w| w == b"?>")?;
    let decl = &rest[..end];

    let start = decl.windows(8).position(|w| w == b"encoding")? + 8;
    let value = decl[start..].trim_ascii_start().strip_prefix(b"=")?;
    let value = value.trim_ascii_start();

    let quote = *value.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &value[1..];
    let close = value.iter().position(|&b| b == quote)?;
    Some(&value[..close])
}

/// Validate that `path` is an existing XML file and read it.
///
/// Call [`XmlSource::parse`] on the result to get the tree.
pub fn validate_xml(path: &Path) -> Result<XmlSource> {
    FileLoader.load(path)
}
