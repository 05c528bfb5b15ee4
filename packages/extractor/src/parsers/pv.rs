//! Preventive-visit (PV) documents.
//!
//! No sections are extracted yet. New sections go into `SECTIONS` as plain
//! functions over the root, built from the shared [`crate::xml`] lookups.

use super::{DocumentParser, SectionSpec};
use crate::types::DocumentKind;

const SECTIONS: &[SectionSpec] = &[];

/// Parser for preventive-visit documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PvParser;

impl DocumentParser for PvParser {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Pv
    }

    fn sections(&self) -> &'static [SectionSpec] {
        SECTIONS
    }
}
