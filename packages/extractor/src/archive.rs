//! Zip archive extraction.
//!
//! ERKNM exports are often delivered as zip bundles of XML documents. Only
//! entries ending in `.xml` (any case) are extracted.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zip::ZipArchive;

use crate::config::{is_xml_entry_name, validate_exists, validate_extension, ZIP_EXTENSION};
use crate::error::Result;

/// Extract every XML entry of `zip_path` into `extract_to`.
///
/// The destination directory is created if absent. Entries keep their
/// relative paths inside the archive.
///
/// # Returns
/// Paths of the extracted files, in archive entry order
///
/// # Errors
/// * `NotFound` if `zip_path` does not exist
/// * `Format` if it does not have a `.zip` extension
/// * `Zip` if the archive cannot be read
pub fn extract_zip(zip_path: &Path, extract_to: &Path) -> Result<Vec<PathBuf>> {
    validate_exists(zip_path)?;
    validate_extension(zip_path, ZIP_EXTENSION)?;

    fs::create_dir_all(extract_to)?;

    let mut archive = ZipArchive::new(File::open(zip_path)?)?;
    let mut extracted = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() || !is_xml_entry_name(entry.name()) {
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            warn!(entry = entry.name(), "Skipping archive entry with unsafe path");
            continue;
        };

        let target = extract_to.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output = File::create(&target)?;
        io::copy(&mut entry, &mut output)?;

        info!(path = %target.display(), "Extracted archive entry");
        extracted.push(target);
    }

    Ok(extracted)
}
