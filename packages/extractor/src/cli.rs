//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::config::{
    has_extension, validate_exists, DEFAULT_EXTRACT_DIR, XML_EXTENSION, ZIP_EXTENSION,
};
use crate::error::{ExtractorError, Result};
use crate::extractor::{extract_archive, extract_file};
use crate::types::{DocumentKind, ExtractionResult};

/// ERKNM extractor - Structured records from inspection XML documents.
#[derive(Parser)]
#[command(name = "erknm-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a .xml document or every .xml document in a .zip archive.
    Extract {
        /// Path to a .xml or .zip file
        input: PathBuf,

        /// Document kind: knm (inspection event) or pv (preventive visit)
        #[arg(short, long, default_value = "knm")]
        kind: String,

        /// Directory for files extracted from a .zip archive
        #[arg(short = 'o', long, default_value = DEFAULT_EXTRACT_DIR)]
        extract_to: PathBuf,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

/// Extraction result of one file from an archive.
#[derive(Serialize)]
struct FileResult<'a> {
    path: String,
    result: &'a ExtractionResult,
}

/// Run the CLI.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract {
            input,
            kind,
            extract_to,
            compact,
        } => extract_command(&input, &kind, &extract_to, compact),
    }
}

/// Execute the extract command.
fn extract_command(input: &Path, kind: &str, extract_to: &Path, compact: bool) -> Result<()> {
    // Reject unknown kinds before touching the filesystem
    let kind: DocumentKind = kind.parse()?;

    if has_extension(input, ZIP_EXTENSION) {
        archive_command(input, kind, extract_to, compact)
    } else if has_extension(input, XML_EXTENSION) {
        let result = extract_file(input, kind.as_str())?;
        println!("{}", to_json(&result, compact)?);
        Ok(())
    } else {
        validate_exists(input)?;
        Err(ExtractorError::format(input, "expected a .xml or .zip file"))
    }
}

/// Extract an archive and print one entry per contained document.
fn archive_command(
    input: &Path,
    kind: DocumentKind,
    extract_to: &Path,
    compact: bool,
) -> Result<()> {
    eprintln!(
        "{} {} into {}",
        style("Extracting").bold(),
        style(input.display()).cyan(),
        style(extract_to.display()).green()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Processing {kind} documents..."));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let results = match extract_archive(input, extract_to, kind.as_str()) {
        Ok(results) => results,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();
    eprintln!("  Documents: {}", style(results.len()).green().bold());

    let entries: Vec<FileResult<'_>> = results
        .iter()
        .map(|(path, result)| FileResult {
            path: path.display().to_string(),
            result,
        })
        .collect();
    println!("{}", to_json(&entries, compact)?);

    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
