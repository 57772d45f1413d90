//! The fixed palette of node kinds.
//!
//! The catalog is static configuration: every lookup is infallible and the set
//! of kinds never changes at runtime.

mod handles;
mod kind;
mod presentation;

pub use handles::*;
pub use kind::NodeKind;
pub use presentation::{Presentation, Shape, presentation};

/// An attribute a node of some kind can carry, as shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeField {
    Description,
    Category,
    Required,
    DefaultValue,
    Assignee,
    TimeLimitHours,
}

impl AttributeField {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeField::Description => "description",
            AttributeField::Category => "category",
            AttributeField::Required => "required",
            AttributeField::DefaultValue => "default_value",
            AttributeField::Assignee => "assignee",
            AttributeField::TimeLimitHours => "time_limit_hours",
        }
    }
}

const COMMON_FIELDS: [AttributeField; 4] = [
    AttributeField::Description,
    AttributeField::Category,
    AttributeField::Required,
    AttributeField::DefaultValue,
];

const APPROVAL_FIELDS: [AttributeField; 6] = [
    AttributeField::Description,
    AttributeField::Category,
    AttributeField::Required,
    AttributeField::DefaultValue,
    AttributeField::Assignee,
    AttributeField::TimeLimitHours,
];

/// The attribute fields meaningful for `kind`, in panel order.
pub fn attribute_fields(kind: NodeKind) -> &'static [AttributeField] {
    match kind {
        NodeKind::Approval => &APPROVAL_FIELDS,
        _ => &COMMON_FIELDS,
    }
}

/// A palette entry: everything the editor needs to place and draw a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: NodeKind,
    pub default_label: &'static str,
    pub presentation: Presentation,
    pub handles: HandleSpec,
    pub fields: &'static [AttributeField],
}

/// Ordered `(kind, default label)` pairs used to populate the palette.
pub fn list_kinds() -> Vec<(NodeKind, &'static str)> {
    NodeKind::ALL
        .iter()
        .map(|kind| (*kind, kind.default_label()))
        .collect()
}

pub fn entry(kind: NodeKind) -> CatalogEntry {
    CatalogEntry {
        kind,
        default_label: kind.default_label(),
        presentation: presentation(kind),
        handles: handle_spec(kind),
        fields: attribute_fields(kind),
    }
}

/// Full palette entries in palette order.
pub fn entries() -> Vec<CatalogEntry> {
    NodeKind::ALL.iter().copied().map(entry).collect()
}
