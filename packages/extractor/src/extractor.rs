//! Extraction entry point tying loading, parsing and archives together.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::archive::extract_zip;
use crate::error::Result;
use crate::loader::{DocumentLoader, FileLoader};
use crate::parsers::get_parser;
use crate::types::ExtractionResult;

/// Extract one XML document of the given kind.
///
/// # Arguments
/// * `path` - Path to an `.xml` file
/// * `kind` - Document-kind key (`knm` or `pv`)
///
/// # Errors
/// `UnknownKind` for an unrecognized key, `NotFound`/`Format` for a missing,
/// misnamed or malformed file. No partial result is returned on error.
pub fn extract_file(path: &Path, kind: &str) -> Result<ExtractionResult> {
    extract_file_with(&FileLoader, path, kind)
}

/// Extract one document, fetching it through `loader`.
pub fn extract_file_with(
    loader: &dyn DocumentLoader,
    path: &Path,
    kind: &str,
) -> Result<ExtractionResult> {
    let parser = get_parser(kind)?;
    let result = parser.parse_with(loader, path)?;

    info!(
        path = %path.display(),
        kind = %parser.kind(),
        sections = result.populated().count(),
        "Extracted document"
    );
    Ok(result)
}

/// Extract every XML document in a zip archive.
///
/// The archive is unpacked into `extract_to` first; documents are then
/// extracted in archive order. The first failing document aborts the batch.
///
/// # Returns
/// `(path, result)` pairs, one per extracted XML file
pub fn extract_archive(
    zip_path: &Path,
    extract_to: &Path,
    kind: &str,
) -> Result<Vec<(PathBuf, ExtractionResult)>> {
    let parser = get_parser(kind)?;
    let files = extract_zip(zip_path, extract_to)?;

    files
        .into_iter()
        .map(|path| -> Result<(PathBuf, ExtractionResult)> {
            let result = parser.parse(&path)?;
            Ok((path, result))
        })
        .collect()
}
