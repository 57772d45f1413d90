use super::ProcessRepository;
use crate::error::PersistenceError;
use crate::graph::{GraphData, ProcessSnapshot};
use crate::model::ProcessId;
use ahash::AHashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps saved graphs in memory. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    processes: RwLock<AHashMap<ProcessId, GraphData>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with an existing graph.
    pub async fn insert(&self, process_id: ProcessId, graph: GraphData) {
        self.processes.write().await.insert(process_id, graph);
    }

    pub async fn len(&self) -> usize {
        self.processes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.processes.read().await.is_empty()
    }
}

#[async_trait]
impl ProcessRepository for InMemoryRepository {
    async fn load(&self, process_id: &ProcessId) -> Result<GraphData, PersistenceError> {
        self.processes
            .read()
            .await
            .get(process_id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(process_id.clone()))
    }

    async fn save(&self, snapshot: &ProcessSnapshot) -> Result<(), PersistenceError> {
        let graph = GraphData::new(snapshot.nodes.clone(), snapshot.edges.clone());
        graph.validate()?;
        self.processes
            .write()
            .await
            .insert(snapshot.process_id.clone(), graph);
        log::debug!("Stored process '{}' in memory", snapshot.process_id);
        Ok(())
    }

    async fn delete(&self, process_id: &ProcessId) -> Result<(), PersistenceError> {
        self.processes
            .write()
            .await
            .remove(process_id)
            .map(|_| ())
            .ok_or_else(|| PersistenceError::NotFound(process_id.clone()))
    }

    async fn list(&self) -> Result<Vec<ProcessId>, PersistenceError> {
        let mut ids: Vec<ProcessId> = self.processes.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
