//! Default-namespace resolution from a document root.
//!
//! ERKNM documents declare a single default namespace on the root element.
//! Lookup paths refer to it through a fixed alias (see
//! [`NAMESPACE_ALIAS`](crate::config::NAMESPACE_ALIAS)), so the table built
//! here has at most one binding.

use std::collections::BTreeMap;

use roxmltree::Node;

use crate::config::NAMESPACE_ALIAS;

/// Mapping from path alias to namespace URI, derived once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    bindings: BTreeMap<String, String>,
}

impl NamespaceTable {
    /// Create a table with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the table from a tag name in Clark notation.
    ///
    /// `{uri}local` binds `uri` to the fixed alias; a tag without a
    /// well-formed `{...}` prefix yields an empty table.
    ///
    /// # Examples
    /// ```
    /// use erknm_extractor::xml::NamespaceTable;
    ///
    /// let table = NamespaceTable::from_clark("{http://example/ns}ROOT");
    /// assert_eq!(table.get("ns"), Some("http://example/ns"));
    ///
    /// assert!(NamespaceTable::from_clark("ROOT").is_empty());
    /// ```
    #[must_use]
    pub fn from_clark(tag: &str) -> Self {
        let mut bindings = BTreeMap::new();
        if let Some(uri) = clark_namespace(tag) {
            bindings.insert(NAMESPACE_ALIAS.to_string(), uri.to_string());
        }
        Self { bindings }
    }

    /// Resolve the table from a parsed root element.
    #[must_use]
    pub fn from_root(root: Node<'_, '_>) -> Self {
        Self::from_clark(&clark_name(root))
    }

    /// Look up the URI bound to `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.bindings.get(alias).map(String::as_str)
    }

    /// The URI bound to the default alias, if any.
    #[must_use]
    pub fn default_namespace(&self) -> Option<&str> {
        self.get(NAMESPACE_ALIAS)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Render an element's expanded name in Clark notation.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use erknm_extractor::xml::clark_name;
///
/// let doc = Document::parse(r#"<KNM xmlns="urn:erknm"/>"#).unwrap();
/// assert_eq!(clark_name(doc.root_element()), "{urn:erknm}KNM");
/// ```
#[must_use]
pub fn clark_name(node: Node<'_, '_>) -> String {
    let name = node.tag_name();
    clark(name.namespace(), name.name())
}

/// Render a namespace URI and local name in Clark notation.
///
/// Names without a namespace are returned unchanged.
///
/// # Examples
/// ```
/// use erknm_extractor::xml::clark;
///
/// assert_eq!(clark(Some("urn:erknm"), "KNM"), "{urn:erknm}KNM");
/// assert_eq!(clark(None, "KNM"), "KNM");
/// ```
#[must_use]
pub fn clark(namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(uri) => format!("{{{uri}}}{local}"),
        None => local.to_string(),
    }
}

/// Extract the URI between a leading `{` and the matching `}`.
fn clark_namespace(tag: &str) -> Option<&str> {
    let (uri, _local) = tag.strip_prefix('{')?.split_once('}')?;
    if uri.is_empty() {
        None
    } else {
        Some(uri)
    }
}
