use crate::error::GraphError;
use crate::model::{Edge, Node, ProcessId};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A bare node/edge collection, as supplied by a load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphData {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Checks id uniqueness and that every edge endpoint exists.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut node_ids = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id()) {
                return Err(GraphError::InvalidGraph(format!(
                    "duplicate node id '{}'",
                    node.id()
                )));
            }
        }

        let mut edge_ids = AHashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !edge_ids.insert(&edge.id) {
                return Err(GraphError::InvalidGraph(format!(
                    "duplicate edge id '{}'",
                    edge.id
                )));
            }
            for end in [&edge.source.node, &edge.target.node] {
                if !node_ids.contains(end) {
                    return Err(GraphError::InvalidGraph(format!(
                        "edge '{}' references unknown node '{}'",
                        edge.id, end
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The serialized form of one process graph, handed to the save collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub process_id: ProcessId,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ProcessSnapshot {
    pub fn new(process_id: ProcessId, graph: GraphData) -> Self {
        Self {
            process_id,
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }

    pub fn into_graph(self) -> GraphData {
        GraphData {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
