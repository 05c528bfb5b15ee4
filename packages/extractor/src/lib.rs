//! ERKNM extractor - structured records from inspection XML documents.
//!
//! This crate reads regulatory-inspection XML documents (inspection events and
//! preventive visits), optionally delivered inside zip archives, and maps each
//! document's namespaced elements and attributes into a plain nested mapping.
//!
//! # Example
//!
//! ```
//! use erknm_extractor::loader::XmlSource;
//! use erknm_extractor::parsers::{get_parser, DocumentParser};
//!
//! let source = XmlSource::new(
//!     "knm.xml",
//!     r#"<KNM xmlns="urn://erknm" DATE_START="2024-01-01"/>"#,
//! );
//! let doc = source.parse().unwrap();
//! let result = get_parser("knm").unwrap().parse_document(&doc);
//!
//! assert!(result.get("knm_date").is_some());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and file validation
//! - [`error`]: Error types and Result alias
//! - [`types`]: Attribute mappings, sections, extraction results
//! - [`xml`]: Namespace resolution and namespaced path lookups
//! - [`loader`]: Document loading and parsing
//! - [`parsers`]: Per-kind document parsers and the parser factory
//! - [`archive`]: Zip archive extraction
//! - [`extractor`]: Extraction entry points
//! - [`cli`]: Command-line interface

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod parsers;
pub mod types;
pub mod xml;

// Re-export main functions
pub use extractor::{extract_archive, extract_file};

// Re-export commonly used items
pub use error::{ErrorKind, ExtractorError, Result};
pub use parsers::{get_parser, DocumentParser};
pub use types::{AttributeMap, DocumentKind, ExtractionResult, Section};
