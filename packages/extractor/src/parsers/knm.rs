//! Inspection-event (KNM) documents.

use roxmltree::Node;
use tracing::debug;

use super::{DocumentParser, SectionSpec};
use crate::types::{AttributeMap, DocumentKind, Section};
use crate::xml::{
    attributes_of, find_all_by_path, find_attribute, find_attributes, find_by_path, find_child,
    find_text, NamespaceTable,
};

/// Children of `OBJECTS`, keyed by section name.
const OBJECT_PARTS: [(&str, &str); 4] = [
    ("object_type", "ns:OBJECT_TYPE"),
    ("object_kind", "ns:OBJECT_KIND"),
    ("object_sub_kind", "ns:OBJECT_SUB_KIND"),
    ("risk_category", "ns:RISK_CATEGORY"),
];

const SECTIONS: &[SectionSpec] = &[
    SectionSpec::new("knm_date", knm_date),
    SectionSpec::new("kind_control", kind_control),
    SectionSpec::new("kind_knm", kind_knm),
    SectionSpec::new("organizations", organizations),
    SectionSpec::new("objects", objects),
    SectionSpec::new("inspectors", inspectors),
    SectionSpec::new("places", places),
    SectionSpec::new("decision", decision),
    SectionSpec::new("reason_risk", reason_risk),
];

/// Parser for inspection-event documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnmParser;

impl DocumentParser for KnmParser {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Knm
    }

    fn sections(&self) -> &'static [SectionSpec] {
        SECTIONS
    }
}

/// Event dates are attributes of the root element.
fn knm_date(root: Node<'_, '_>, _ns: &NamespaceTable) -> Section {
    attributes_of(root).into()
}

fn kind_control(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    find_attributes(root, "ns:KIND_CONTROL", ns).into()
}

fn kind_knm(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    find_attributes(root, "ns:KIND_KNM", ns).into()
}

fn organizations(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    Section::nested([
        (
            "organizations",
            Section::from(find_attributes(root, "ns:ORGANIZATIONS", ns)),
        ),
        (
            "okveds",
            Section::from(find_attributes(root, "ns:ORGANIZATIONS/ns:OKVEDS", ns)),
        ),
    ])
}

fn objects(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    let objects = find_child(root, "ns:OBJECTS", ns);

    Section::nested(OBJECT_PARTS.map(|(name, path)| {
        let attrs = objects
            .map(|node| find_attributes(node, path, ns))
            .unwrap_or_default();
        (name, Section::Attributes(attrs))
    }))
}

/// One entry per `INSPECTORS` element, in document order.
fn inspectors(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    let entries = find_all_by_path(root, "ns:INSPECTORS", ns)
        .into_iter()
        .map(|inspector| {
            let mut entry = AttributeMap::new();
            entry.insert(
                "full_name".to_string(),
                inspector
                    .attribute("INSPECTORS_FULL_NAME")
                    .unwrap_or_default()
                    .to_string(),
            );
            entry.insert(
                "guid".to_string(),
                inspector.attribute("GUID").unwrap_or_default().to_string(),
            );
            entry.insert(
                "position".to_string(),
                find_attribute(inspector, "ns:INSPECTOR_POSITION", "TITLE", ns),
            );
            entry
        })
        .collect();

    Section::List(entries)
}

fn places(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    Section::Text(find_text(root, "ns:PLACES", ns))
}

fn decision(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    let mut attrs = AttributeMap::new();
    attrs.insert(
        "signer".to_string(),
        find_attribute(root, "ns:DECISION", "FIO_SIGNER", ns),
    );
    attrs.insert(
        "title".to_string(),
        find_attribute(root, "ns:DECISION/ns:TITLE_SIGNER", "TITLE", ns),
    );
    attrs.into()
}

/// Reason and risk indicators.
///
/// The rule mapping `REASON_TYPE` against the event kind is not defined yet,
/// so this section is always empty. The located values are logged.
// TODO: fill in once the REASON_TYPE / KIND_KNM mapping is specified.
fn reason_risk(root: Node<'_, '_>, ns: &NamespaceTable) -> Section {
    if let Some(reason_type) = find_by_path(root, "ns:REASON_RISK/ns:REASON/ns:REASON_TYPE", ns) {
        let kind_knm = find_attributes(root, "ns:KIND_KNM", ns);
        debug!(
            reason_type = ?attributes_of(reason_type),
            kind_knm = ?kind_knm,
            "Reason/risk mapping not defined, leaving section empty"
        );
    }
    Section::empty()
}
