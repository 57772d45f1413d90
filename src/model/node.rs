use super::{AttributePatch, NodeAttributes, NodeId};
use crate::catalog::NodeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, delta: Position) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single workflow step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    pub label: String,
    pub position: Position,
    attributes: NodeAttributes,
}

impl Node {
    /// Creates a node of `kind` with default attributes.
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
        Self::with_attributes(id, label, position, NodeAttributes::defaults_for(kind))
    }

    pub fn with_attributes(
        id: NodeId,
        label: impl Into<String>,
        position: Position,
        attributes: NodeAttributes,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            position,
            attributes,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.attributes.kind()
    }

    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }

    /// Applies `patch` to the label and attributes. Callers check applicability first.
    pub(crate) fn apply_patch(&mut self, patch: &AttributePatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        patch.apply_to(&mut self.attributes);
    }

    /// A copy of this node under a new id and position.
    pub(crate) fn duplicate(&self, id: NodeId, position: Position) -> Self {
        Self {
            id,
            label: self.label.clone(),
            position,
            attributes: self.attributes.clone(),
        }
    }
}
