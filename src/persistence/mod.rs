//! The save/load/delete boundary of a process graph.
//!
//! The editor only depends on [`ProcessRepository`]; where graphs actually
//! live is up to the implementation.

mod file;
mod memory;

pub use file::{FileRepository, SnapshotFormat};
pub use memory::InMemoryRepository;

use crate::error::PersistenceError;
use crate::graph::{GraphData, ProcessSnapshot};
use crate::model::ProcessId;
use async_trait::async_trait;

/// External collaborator that stores process graphs by process id.
#[async_trait]
pub trait ProcessRepository: Send + Sync {
    /// Returns the saved graph, or [`PersistenceError::NotFound`] for an unknown process.
    async fn load(&self, process_id: &ProcessId) -> Result<GraphData, PersistenceError>;

    /// Stores `snapshot`, replacing any previous graph of the same process.
    async fn save(&self, snapshot: &ProcessSnapshot) -> Result<(), PersistenceError>;

    /// Removes the whole process record.
    async fn delete(&self, process_id: &ProcessId) -> Result<(), PersistenceError>;

    /// Ids of every stored process, sorted.
    async fn list(&self) -> Result<Vec<ProcessId>, PersistenceError>;
}
