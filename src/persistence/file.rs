use super::ProcessRepository;
use crate::error::PersistenceError;
use crate::graph::{GraphData, ProcessSnapshot};
use crate::model::ProcessId;
use async_trait::async_trait;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// On-disk encoding of a saved process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON, `<process>.json`.
    #[default]
    Json,
    /// Compact bincode, `<process>.bin`.
    Binary,
}

impl SnapshotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Binary => "bin",
        }
    }

    pub fn encode(&self, snapshot: &ProcessSnapshot) -> Result<Vec<u8>, PersistenceError> {
        match self {
            SnapshotFormat::Json => serde_json::to_vec_pretty(snapshot)
                .map_err(|e| PersistenceError::Serialization(e.to_string())),
            SnapshotFormat::Binary => encode_to_vec(snapshot, standard())
                .map_err(|e| PersistenceError::Serialization(e.to_string())),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<ProcessSnapshot, PersistenceError> {
        match self {
            SnapshotFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| PersistenceError::Serialization(e.to_string())),
            // bincode 2 returns (value, bytes_read)
            SnapshotFormat::Binary => decode_from_slice(bytes, standard())
                .map(|(snapshot, _)| snapshot)
                .map_err(|e| PersistenceError::Serialization(e.to_string())),
        }
    }
}

/// Stores one file per process under a root directory.
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
    format: SnapshotFormat,
}

impl FileRepository {
    pub fn new(root: impl Into<PathBuf>, format: SnapshotFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    /// Path of the file backing `process_id`.
    pub fn path_for(&self, process_id: &ProcessId) -> Result<PathBuf, PersistenceError> {
        let raw = process_id.as_str();
        let invalid = raw.is_empty()
            || raw == "."
            || raw.contains("..")
            || raw.contains(['/', '\\'])
            || raw.chars().any(char::is_control);
        if invalid {
            return Err(PersistenceError::InvalidProcessId(raw.to_string()));
        }
        Ok(self
            .root
            .join(format!("{}.{}", raw, self.format.extension())))
    }
}

fn io_error(path: &Path, e: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl ProcessRepository for FileRepository {
    async fn load(&self, process_id: &ProcessId) -> Result<GraphData, PersistenceError> {
        let path = self.path_for(process_id)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(process_id.clone()));
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        let snapshot = self.format.decode(&bytes)?;
        if &snapshot.process_id != process_id {
            log::warn!(
                "File '{}' holds process '{}'; loading it as '{}'",
                path.display(),
                snapshot.process_id,
                process_id
            );
        }
        let graph = snapshot.into_graph();
        graph.validate()?;
        Ok(graph)
    }

    async fn save(&self, snapshot: &ProcessSnapshot) -> Result<(), PersistenceError> {
        let path = self.path_for(&snapshot.process_id)?;
        GraphData::new(snapshot.nodes.clone(), snapshot.edges.clone()).validate()?;
        let bytes = self.format.encode(snapshot)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(&self.root, e))?;

        // One staging file per write; concurrent saves of a process must not share it.
        let staging = path.with_extension(format!(
            "{}.{}.tmp",
            self.format.extension(),
            Uuid::new_v4().simple()
        ));
        if let Err(e) = fs::write(&staging, &bytes).await {
            let _ = fs::remove_file(&staging).await;
            return Err(io_error(&staging, e));
        }
        if let Err(e) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(io_error(&path, e));
        }

        log::debug!(
            "Saved process '{}' to '{}' ({} bytes)",
            snapshot.process_id,
            path.display(),
            bytes.len()
        );
        Ok(())
    }

    async fn delete(&self, process_id: &ProcessId) -> Result<(), PersistenceError> {
        let path = self.path_for(process_id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(PersistenceError::NotFound(process_id.clone()))
            }
            Err(e) => Err(io_error(&path, e)),
        }
    }

    async fn list(&self) -> Result<Vec<ProcessId>, PersistenceError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.root, e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.root, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.format.extension()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(ProcessId::new(stem));
            }
        }
        ids.sort();
        Ok(ids)
    }
}
