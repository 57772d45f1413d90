use super::GraphStore;
use crate::catalog::{NodeKind, handle_spec};
use crate::model::{EdgeId, NodeId};
use ahash::AHashSet;
use itertools::Itertools;
use std::collections::VecDeque;

/// Structural warnings about a graph.
///
/// None of these conditions are rejected by the store; the report exists so
/// an editor can surface them before the process is published.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphReport {
    pub has_start: bool,
    /// Nodes with no incoming edge.
    pub entry_points: Vec<NodeId>,
    /// Nodes that cannot be reached from any start node.
    pub unreachable: Vec<NodeId>,
    /// Non-end nodes with no outgoing edge.
    pub dead_ends: Vec<NodeId>,
    pub self_loops: Vec<EdgeId>,
    /// Groups of edges that join the same pair of handles.
    pub parallel_edges: Vec<Vec<EdgeId>>,
    pub has_cycle: bool,
}

impl GraphReport {
    pub fn is_clean(&self) -> bool {
        self.has_start
            && self.unreachable.is_empty()
            && self.dead_ends.is_empty()
            && self.self_loops.is_empty()
            && self.parallel_edges.is_empty()
            && !self.has_cycle
    }
}

pub fn analyze(store: &GraphStore) -> GraphReport {
    let nodes = store.nodes();
    let edges = store.edges();

    let starts: Vec<&NodeId> = nodes
        .iter()
        .filter(|n| n.kind() == NodeKind::Start)
        .map(|n| n.id())
        .collect();

    let targets: AHashSet<&NodeId> = edges.iter().map(|e| &e.target.node).collect();
    let entry_points = nodes
        .iter()
        .map(|n| n.id())
        .filter(|id| !targets.contains(id))
        .cloned()
        .collect();

    let reachable = reachable_from(store, &starts);
    let unreachable = nodes
        .iter()
        .map(|n| n.id())
        .filter(|id| !reachable.contains(id))
        .cloned()
        .collect();

    let dead_ends = nodes
        .iter()
        .filter(|n| handle_spec(n.kind()).outgoing_count() > 0)
        .filter(|n| store.outgoing(n.id()).next().is_none())
        .map(|n| n.id().clone())
        .collect();

    let self_loops = edges
        .iter()
        .filter(|e| e.is_self_loop())
        .map(|e| e.id.clone())
        .collect();

    let parallel_edges = edges
        .iter()
        .into_group_map_by(|e| (&e.source, &e.target))
        .into_values()
        .filter(|group| group.len() > 1)
        .map(|group| group.into_iter().map(|e| e.id.clone()).collect_vec())
        .sorted()
        .collect();

    GraphReport {
        has_start: !starts.is_empty(),
        entry_points,
        unreachable,
        dead_ends,
        self_loops,
        parallel_edges,
        has_cycle: has_cycle(store),
    }
}

fn reachable_from<'a>(store: &'a GraphStore, roots: &[&'a NodeId]) -> AHashSet<&'a NodeId> {
    let mut seen = AHashSet::new();
    let mut queue: VecDeque<&NodeId> = roots.iter().copied().collect();
    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        queue.extend(store.outgoing(current).map(|e| &e.target.node));
    }
    seen
}

/// Kahn's algorithm: a cycle exists iff not every node can be peeled off.
fn has_cycle(store: &GraphStore) -> bool {
    let counts = store.edges().iter().map(|e| &e.target.node).counts();
    let mut in_degree: Vec<(&NodeId, usize)> = store
        .nodes()
        .iter()
        .map(|n| (n.id(), counts.get(n.id()).copied().unwrap_or(0)))
        .collect();

    let mut ready: VecDeque<&NodeId> = in_degree
        .iter()
        .filter(|(_, degree)| *degree == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut removed = 0;

    while let Some(id) = ready.pop_front() {
        removed += 1;
        for edge in store.outgoing(id) {
            if let Some(entry) = in_degree.iter_mut().find(|(n, _)| *n == &edge.target.node) {
                entry.1 -= 1;
                if entry.1 == 0 {
                    ready.push_back(entry.0);
                }
            }
        }
    }

    removed < in_degree.len()
}
