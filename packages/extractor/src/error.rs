//! Error types for the extractor.
//!
//! File-level failures are fatal to a single extraction call and carry the
//! offending path. Section-level misses inside a document parser are never
//! errors; they degrade to empty values instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Referenced file does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// File extension or content does not match the expected kind.
    #[error("Unexpected file format for {}: {reason}", .path.display())]
    Format { path: PathBuf, reason: String },

    /// File content is not well-formed XML.
    #[error("XML parsing failed for {}: {source}", .path.display())]
    XmlParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Document-kind key not recognized by the parser factory.
    #[error("Unknown document kind: '{0}'. Expected one of: knm, pv")]
    UnknownKind(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip archive could not be read.
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`ExtractorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Format,
    UnknownKind,
    Io,
}

impl ExtractorError {
    /// Build a format error for `path`.
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error.
    ///
    /// Malformed XML is a format problem, as is a broken zip container.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Format { .. } | Self::XmlParse { .. } | Self::Zip(_) => ErrorKind::Format,
            Self::UnknownKind(_) => ErrorKind::UnknownKind,
            Self::Io(_) | Self::Json(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
