use super::{ConnectionPolicy, GraphData, ProcessSnapshot};
use crate::catalog::NodeKind;
use crate::error::{ConnectionRejection, GraphError};
use crate::model::{AttributePatch, Edge, EdgeId, HandleRef, Node, NodeId, Position, ProcessId};
use ahash::AHashSet;
use std::collections::VecDeque;

/// In-memory node and edge collections of one process graph.
///
/// All mutation goes through the methods below. Every mutation that actually
/// changes the graph sets the dirty flag and bumps the revision counter; an
/// operation addressed at a missing node or edge changes nothing.
#[derive(Debug, Clone)]
pub struct GraphStore {
    process_id: ProcessId,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    policy: ConnectionPolicy,
    dirty: bool,
    revision: u64,
}

impl GraphStore {
    /// An empty, clean graph for `process_id`.
    pub fn new(process_id: ProcessId) -> Self {
        Self::with_policy(process_id, ConnectionPolicy::default())
    }

    pub fn with_policy(process_id: ProcessId, policy: ConnectionPolicy) -> Self {
        Self {
            process_id,
            nodes: Vec::new(),
            edges: Vec::new(),
            policy,
            dirty: false,
            revision: 0,
        }
    }

    pub fn process_id(&self) -> &ProcessId {
        &self.process_id
    }

    pub fn policy(&self) -> ConnectionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ConnectionPolicy) {
        self.policy = policy;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Counter of effective mutations since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn outgoing<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.source.node == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.target.node == id)
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    /// Places a new node with default attributes for `kind` and returns its id.
    pub fn add_node(&mut self, kind: NodeKind, label: impl Into<String>, position: Position) -> NodeId {
        let id = self.fresh_node_id();
        let node = Node::new(id.clone(), kind, label, position);
        log::debug!("Adding {} node '{}' at {}", kind, id, position);
        self.nodes.push(node);
        self.touch();
        id
    }

    /// Moves a node. Returns `false` and changes nothing if the node is missing.
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                self.touch();
                true
            }
            None => {
                log::debug!("Ignoring move of unknown node '{}'", id);
                false
            }
        }
    }

    /// Merges `patch` into the node's label and attributes.
    ///
    /// The patch is applied entirely or not at all.
    pub fn update_node(&mut self, id: &NodeId, patch: &AttributePatch) -> Result<(), GraphError> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        patch.check_applicable(node.kind())?;
        node.apply_patch(patch);
        self.touch();
        Ok(())
    }

    /// Removes a node together with every edge that touches it.
    pub fn delete_node(&mut self, id: &NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id() == id)?;
        let node = self.nodes.remove(index);

        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        log::debug!(
            "Deleted node '{}' and {} attached edge(s)",
            id,
            before - self.edges.len()
        );

        self.touch();
        Some(node)
    }

    /// Copies a node's kind, label and attributes to a new node placed at `offset`
    /// from the original. The copy has no edges.
    pub fn duplicate_node(&mut self, id: &NodeId, offset: Position) -> Result<NodeId, GraphError> {
        let source = self
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        let new_id = self.fresh_node_id();
        let copy = source.duplicate(new_id.clone(), source.position.offset(offset));
        log::debug!("Duplicated node '{}' as '{}'", id, new_id);
        self.nodes.push(copy);
        self.touch();
        Ok(new_id)
    }

    /// Records an edge between two handles, subject to the connection policy.
    pub fn connect(&mut self, source: HandleRef, target: HandleRef) -> Result<EdgeId, GraphError> {
        let source_kind = self
            .node(&source.node)
            .ok_or_else(|| GraphError::NodeNotFound(source.node.clone()))?
            .kind();
        let target_kind = self
            .node(&target.node)
            .ok_or_else(|| GraphError::NodeNotFound(target.node.clone()))?
            .kind();

        if let Err(reason) = self.check_connection(&source, source_kind, &target, target_kind) {
            log::debug!("Rejected connection {} -> {}: {}", source, target, reason);
            return Err(GraphError::ConnectionRejected {
                source_node: source.node,
                target_node: target.node,
                reason,
            });
        }

        let id = self.fresh_edge_id();
        log::debug!("Connecting {} -> {} as '{}'", source, target, id);
        self.edges.push(Edge::new(id.clone(), source, target));
        self.touch();
        Ok(id)
    }

    fn check_connection(
        &self,
        source: &HandleRef,
        source_kind: NodeKind,
        target: &HandleRef,
        target_kind: NodeKind,
    ) -> Result<(), ConnectionRejection> {
        let policy = self.policy;
        if !policy.allow_self_loops && source.node == target.node {
            return Err(ConnectionRejection::SelfLoop);
        }
        policy.check_handles(
            source_kind,
            source.handle.as_deref(),
            target_kind,
            target.handle.as_deref(),
        )?;
        if !policy.allow_parallel_edges && self.edges.iter().any(|e| e.parallels(source, target)) {
            return Err(ConnectionRejection::ParallelEdge);
        }
        if !policy.allow_cycles && self.reaches(&target.node, &source.node) {
            return Err(ConnectionRejection::Cycle);
        }
        Ok(())
    }

    /// Breadth-first search along edge direction.
    pub fn reaches(&self, from: &NodeId, to: &NodeId) -> bool {
        if from == to {
            return true;
        }
        let mut seen: AHashSet<&NodeId> = AHashSet::new();
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            for edge in self.outgoing(current) {
                if &edge.target.node == to {
                    return true;
                }
                queue.push_back(&edge.target.node);
            }
        }
        false
    }

    /// Removes an edge by id.
    pub fn disconnect(&mut self, id: &EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|e| &e.id == id)?;
        let edge = self.edges.remove(index);
        self.touch();
        Some(edge)
    }

    /// The full node/edge collection together with the owning process id.
    pub fn serialize(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            process_id: self.process_id.clone(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Replaces both collections wholesale and clears the dirty flag.
    ///
    /// Input that breaks id uniqueness or references missing nodes is rejected
    /// and the store is left as it was.
    pub fn hydrate(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), GraphError> {
        let data = GraphData::new(nodes, edges);
        data.validate()?;
        log::debug!(
            "Hydrating process '{}' with {} node(s) and {} edge(s)",
            self.process_id,
            data.nodes.len(),
            data.edges.len()
        );
        self.nodes = data.nodes;
        self.edges = data.edges;
        self.dirty = false;
        self.revision += 1;
        Ok(())
    }

    /// Clears the dirty flag after a successful save.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn fresh_node_id(&self) -> NodeId {
        loop {
            let id = NodeId::generate();
            if !self.contains_node(&id) {
                return id;
            }
        }
    }

    fn fresh_edge_id(&self) -> EdgeId {
        loop {
            let id = EdgeId::generate();
            if self.edge(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GraphStore {
        GraphStore::new(ProcessId::new("p-1"))
    }

    #[test]
    fn test_failed_operations_leave_store_clean() {
        let mut store = store();
        let ghost = NodeId::new("ghost");

        assert!(!store.move_node(&ghost, Position::new(1.0, 1.0)));
        assert!(store.delete_node(&ghost).is_none());
        assert!(store.disconnect(&EdgeId::new("ghost-edge")).is_none());
        assert_eq!(
            store.update_node(&ghost, &AttributePatch::default().label("x")),
            Err(GraphError::NodeNotFound(ghost.clone()))
        );

        assert!(!store.is_dirty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_reaches_follows_edge_direction() {
        let mut store = store();
        let a = store.add_node(NodeKind::Start, "A", Position::default());
        let b = store.add_node(NodeKind::Process, "B", Position::default());
        let c = store.add_node(NodeKind::End, "C", Position::default());
        store.connect(HandleRef::node(a.clone()), HandleRef::node(b.clone())).unwrap();
        store.connect(HandleRef::node(b.clone()), HandleRef::node(c.clone())).unwrap();

        assert!(store.reaches(&a, &c));
        assert!(!store.reaches(&c, &a));
    }

    #[test]
    fn test_strict_policy_rejects_cycle() {
        let mut store = GraphStore::with_policy(ProcessId::new("p-2"), ConnectionPolicy::strict());
        let a = store.add_node(NodeKind::Process, "A", Position::default());
        let b = store.add_node(NodeKind::Process, "B", Position::default());
        store.connect(HandleRef::node(a.clone()), HandleRef::node(b.clone())).unwrap();

        let err = store
            .connect(HandleRef::node(b.clone()), HandleRef::node(a.clone()))
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::ConnectionRejected {
                reason: ConnectionRejection::Cycle,
                ..
            }
        ));
        assert_eq!(store.edges().len(), 1);
    }
}
