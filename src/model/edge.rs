use super::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One end of an edge: a node plus, for multi-handle nodes, the handle used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleRef {
    pub node: NodeId,
    pub handle: Option<String>,
}

impl HandleRef {
    pub fn node(node: impl Into<NodeId>) -> Self {
        Self {
            node: node.into(),
            handle: None,
        }
    }

    pub fn with_handle(node: impl Into<NodeId>, handle: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            handle: Some(handle.into()),
        }
    }
}

impl fmt::Display for HandleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.handle {
            Some(handle) => write!(f, "{}:{}", self.node, handle),
            None => write!(f, "{}", self.node),
        }
    }
}

/// A directed connection between two node handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: HandleRef,
    pub target: HandleRef,
}

impl Edge {
    pub fn new(id: EdgeId, source: HandleRef, target: HandleRef) -> Self {
        Self { id, source, target }
    }

    /// True when either end of the edge sits on `node`.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source.node == node || &self.target.node == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.source.node == self.target.node
    }

    /// True when both edges join the same pair of handles.
    pub fn parallels(&self, source: &HandleRef, target: &HandleRef) -> bool {
        &self.source == source && &self.target == target
    }
}
