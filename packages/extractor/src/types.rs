//! Core data types for extraction results.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ExtractorError;

/// Attributes of one element, keyed by attribute name.
///
/// An absent element and an element without attributes both map to an empty
/// mapping.
pub type AttributeMap = BTreeMap<String, String>;

/// Kind of ERKNM document, selecting which parser applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Inspection event (контрольное надзорное мероприятие).
    Knm,

    /// Preventive visit (профилактический визит).
    Pv,
}

impl DocumentKind {
    /// All recognized kinds.
    pub const ALL: [Self; 2] = [Self::Knm, Self::Pv];

    /// Get the key used to select this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knm => "knm",
            Self::Pv => "pv",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ExtractorError;

    /// Parse a document-kind key.
    ///
    /// # Examples
    /// ```
    /// use erknm_extractor::types::DocumentKind;
    ///
    /// assert_eq!("knm".parse::<DocumentKind>().unwrap(), DocumentKind::Knm);
    /// assert!("unknown".parse::<DocumentKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "knm" => Ok(Self::Knm),
            "pv" => Ok(Self::Pv),
            other => Err(ExtractorError::UnknownKind(other.to_string())),
        }
    }
}

/// One named slice of an extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Section {
    /// Text content of an element.
    Text(String),

    /// Attributes of a single element.
    Attributes(AttributeMap),

    /// Named sub-sections, e.g. organizations and their OKVEDs.
    Nested(BTreeMap<String, Section>),

    /// Repeated elements in document order.
    List(Vec<AttributeMap>),
}

impl Section {
    /// An empty attribute mapping.
    #[must_use]
    pub fn empty() -> Self {
        Self::Attributes(AttributeMap::new())
    }

    /// Build a nested section from `(name, section)` pairs.
    pub fn nested<K: Into<String>>(entries: impl IntoIterator<Item = (K, Section)>) -> Self {
        Self::Nested(
            entries
                .into_iter()
                .map(|(name, section)| (name.into(), section))
                .collect(),
        )
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_attributes(&self) -> Option<&AttributeMap> {
        match self {
            Self::Attributes(attrs) => Some(attrs),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_nested(&self) -> Option<&BTreeMap<String, Section>> {
        match self {
            Self::Nested(sections) => Some(sections),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[AttributeMap]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check whether this section carries no data at any depth.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Attributes(attrs) => attrs.is_empty(),
            Self::Nested(sections) => sections.values().all(Section::is_empty),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl From<AttributeMap> for Section {
    fn from(attrs: AttributeMap) -> Self {
        Self::Attributes(attrs)
    }
}

/// Mapping from section name to section, built fresh per parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    sections: BTreeMap<String, Section>,
}

impl ExtractionResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a section.
    pub fn insert(&mut self, name: impl Into<String>, section: Section) {
        self.sections.insert(name.into(), section);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate sections ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, section)| (name.as_str(), section))
    }

    /// Names of sections that carry data.
    pub fn populated(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, section)| !section.is_empty())
            .map(|(name, _)| name)
    }
}
