//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! Lookup paths are slash-separated steps relative to a parent element. Each
//! step is either `alias:LOCAL` (resolved through a [`NamespaceTable`]) or a
//! bare `LOCAL`, and matches direct element children only.

use roxmltree::Node;

use super::namespace::{clark, NamespaceTable};
use crate::types::AttributeMap;

/// One resolved step of a lookup path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step<'p> {
    namespace: Option<&'p str>,
    local: &'p str,
}

impl<'p> Step<'p> {
    /// Resolve a path segment against `ns`.
    ///
    /// An alias that the table does not bind matches un-namespaced elements,
    /// so the same paths work for documents without a default namespace.
    fn resolve(segment: &'p str, ns: &'p NamespaceTable) -> Self {
        match segment.split_once(':') {
            Some((alias, local)) => Step {
                namespace: ns.get(alias),
                local,
            },
            None => Step {
                namespace: None,
                local: segment,
            },
        }
    }

    fn matches(&self, node: Node<'_, '_>) -> bool {
        node.is_element()
            && get_tag_name(node) == self.local
            && node.tag_name().namespace() == self.namespace
    }
}

/// Get the tag name without namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use erknm_extractor::xml::get_tag_name;
///
/// let xml = r#"<KNM xmlns="urn:erknm"><OBJECTS/></KNM>"#;
/// let doc = Document::parse(xml).unwrap();
/// let objects = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(objects), "OBJECTS");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element matching a single path step.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use erknm_extractor::xml::{find_child, NamespaceTable};
///
/// let xml = r#"<KNM xmlns="urn:erknm"><KIND_KNM/></KNM>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
/// let ns = NamespaceTable::from_root(root);
///
/// assert!(find_child(root, "ns:KIND_KNM", &ns).is_some());
/// assert!(find_child(root, "ns:MISSING", &ns).is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    segment: &str,
    ns: &NamespaceTable,
) -> Option<Node<'a, 'input>> {
    let step = Step::resolve(segment, ns);
    node.children().find(|child| step.matches(*child))
}

/// Find the first descendant matching a slash-separated path.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use erknm_extractor::xml::{find_by_path, NamespaceTable};
///
/// let xml = r#"<KNM xmlns="urn:erknm"><DECISION><TITLE_SIGNER TITLE="Head"/></DECISION></KNM>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
/// let ns = NamespaceTable::from_root(root);
///
/// let title = find_by_path(root, "ns:DECISION/ns:TITLE_SIGNER", &ns);
/// assert_eq!(title.unwrap().attribute("TITLE"), Some("Head"));
/// ```
pub fn find_by_path<'a, 'input>(
    node: Node<'a, 'input>,
    path: &str,
    ns: &NamespaceTable,
) -> Option<Node<'a, 'input>> {
    let mut current = node;

    for segment in path.split('/') {
        current = find_child(current, segment, ns)?;
    }

    Some(current)
}

/// Find every element matching a slash-separated path, in document order.
///
/// All steps but the last follow the first match; the last step collects
/// every matching sibling.
pub fn find_all_by_path<'a, 'input>(
    node: Node<'a, 'input>,
    path: &str,
    ns: &NamespaceTable,
) -> Vec<Node<'a, 'input>> {
    let (parent, last) = match path.rsplit_once('/') {
        Some((prefix, last)) => match find_by_path(node, prefix, ns) {
            Some(parent) => (parent, last),
            None => return Vec::new(),
        },
        None => (node, path),
    };

    let step = Step::resolve(last, ns);
    parent
        .children()
        .filter(|child| step.matches(*child))
        .collect()
}

/// Collect the attributes of an element.
///
/// Namespaced attributes are keyed in Clark notation (`{uri}local`).
pub fn attributes_of(node: Node<'_, '_>) -> AttributeMap {
    node.attributes()
        .map(|attr| (clark(attr.namespace(), attr.name()), attr.value().to_string()))
        .collect()
}

/// Return the attributes of the first element matching `path`.
///
/// A path that resolves to nothing yields an empty mapping, the same as an
/// element without attributes.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use erknm_extractor::xml::{find_attributes, NamespaceTable};
///
/// let xml = r#"<KNM xmlns="urn:erknm"><KIND_KNM ID="1" NAME="Inspection"/></KNM>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
/// let ns = NamespaceTable::from_root(root);
///
/// assert_eq!(find_attributes(root, "ns:KIND_KNM", &ns).len(), 2);
/// assert!(find_attributes(root, "ns:MISSING", &ns).is_empty());
/// ```
pub fn find_attributes(node: Node<'_, '_>, path: &str, ns: &NamespaceTable) -> AttributeMap {
    find_by_path(node, path, ns)
        .map(attributes_of)
        .unwrap_or_default()
}

/// Return one attribute of the first element matching `path`.
///
/// Empty string if the element or the attribute is absent.
pub fn find_attribute(node: Node<'_, '_>, path: &str, name: &str, ns: &NamespaceTable) -> String {
    find_by_path(node, path, ns)
        .and_then(|found| found.attribute(name))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Get the text content of a node, trimmed.
///
/// # Returns
/// Trimmed text content, or empty string if no text
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get the trimmed text of the first element matching `path`.
pub fn find_text(node: Node<'_, '_>, path: &str, ns: &NamespaceTable) -> String {
    find_by_path(node, path, ns)
        .map(get_text)
        .unwrap_or_default()
}
