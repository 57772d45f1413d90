//! Common test utilities for building graphs, sessions and fake repositories.
use async_trait::async_trait;
use procflow::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A canvas export as the browser front-end posts it.
///
/// Shape: start -> check -> decision (yes -> approval -> end, no -> end)
#[allow(dead_code)]
pub const UI_GRAPH_JSON: &str = r#"
{
  "nodes": [
    { "id": "n-start", "type": "custom", "position": { "x": 250, "y": 0 },
      "data": { "label": "Start", "nodeType": "start" } },
    { "id": "n-check", "type": "custom", "position": { "x": 250, "y": 120 },
      "data": { "label": "Check invoice", "nodeType": "process",
                "description": "Match against PO", "category": "finance", "required": true } },
    { "id": "n-decide", "type": "custom", "position": { "x": 250, "y": 240 },
      "data": { "label": "Over limit?", "nodeType": "decision" } },
    { "id": "n-approve", "type": "custom", "position": { "x": 100, "y": 360 },
      "data": { "label": "CFO approval", "nodeType": "approval",
                "assignee": "cfo", "timeLimit": 48, "defaultValue": "pending" } },
    { "id": "n-end", "type": "custom", "position": { "x": 250, "y": 480 },
      "data": { "label": "End", "node_type": "end" } }
  ],
  "edges": [
    { "id": "e1", "source": "n-start", "target": "n-check" },
    { "id": "e2", "source": "n-check", "target": "n-decide" },
    { "id": "e3", "source": "n-decide", "sourceHandle": "yes", "target": "n-approve" },
    { "id": "e4", "source": "n-decide", "sourceHandle": "no", "target": "n-end" },
    { "id": "e5", "source": "n-approve", "target": "n-end" }
  ]
}
"#;

/// A store holding Start -> Process -> End.
#[allow(dead_code)]
pub fn linear_store() -> (GraphStore, [NodeId; 3]) {
    let mut store = GraphStore::new(ProcessId::new("linear"));
    let start = store.add_node(NodeKind::Start, "Start", Position::new(0.0, 0.0));
    let step = store.add_node(NodeKind::Process, "Step 1", Position::new(100.0, 0.0));
    let end = store.add_node(NodeKind::End, "End", Position::new(200.0, 0.0));
    store
        .connect(HandleRef::node(start.clone()), HandleRef::node(step.clone()))
        .expect("start -> step");
    store
        .connect(HandleRef::node(step.clone()), HandleRef::node(end.clone()))
        .expect("step -> end");
    (store, [start, step, end])
}

/// An editor surface over an empty graph with a fixed random seed.
#[allow(dead_code)]
pub fn seeded_surface(config: &EditorConfig) -> EditorSurface {
    EditorSurface::with_rng(
        GraphStore::new(ProcessId::new("surface")),
        config,
        StdRng::seed_from_u64(7),
    )
}

/// A repository whose every request fails, counting save attempts.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingRepository {
    pub save_attempts: AtomicUsize,
}

#[allow(dead_code)]
impl FailingRepository {
    pub fn saves(&self) -> usize {
        self.save_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProcessRepository for FailingRepository {
    async fn load(&self, _process_id: &ProcessId) -> std::result::Result<GraphData, PersistenceError> {
        Err(PersistenceError::Backend("load endpoint unavailable".to_string()))
    }

    async fn save(&self, _snapshot: &ProcessSnapshot) -> std::result::Result<(), PersistenceError> {
        self.save_attempts.fetch_add(1, Ordering::SeqCst);
        Err(PersistenceError::Backend("save endpoint unavailable".to_string()))
    }

    async fn delete(&self, _process_id: &ProcessId) -> std::result::Result<(), PersistenceError> {
        Err(PersistenceError::Backend("delete endpoint unavailable".to_string()))
    }

    async fn list(&self) -> std::result::Result<Vec<ProcessId>, PersistenceError> {
        Ok(Vec::new())
    }
}

/// A repository that never answers.
#[allow(dead_code)]
pub struct StalledRepository;

#[async_trait]
impl ProcessRepository for StalledRepository {
    async fn load(&self, _process_id: &ProcessId) -> std::result::Result<GraphData, PersistenceError> {
        std::future::pending().await
    }

    async fn save(&self, _snapshot: &ProcessSnapshot) -> std::result::Result<(), PersistenceError> {
        std::future::pending().await
    }

    async fn delete(&self, _process_id: &ProcessId) -> std::result::Result<(), PersistenceError> {
        std::future::pending().await
    }

    async fn list(&self) -> std::result::Result<Vec<ProcessId>, PersistenceError> {
        std::future::pending().await
    }
}
