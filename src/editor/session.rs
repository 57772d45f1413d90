use super::EditorSurface;
use crate::config::EditorConfig;
use crate::error::{EditorError, PersistenceError};
use crate::graph::{GraphData, GraphStore, ProcessSnapshot};
use crate::model::ProcessId;
use crate::persistence::ProcessRepository;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// What to do when a save is requested while another one is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveGuard {
    /// Issue the request anyway. Fine for a single user saving by hand.
    #[default]
    AllowConcurrent,
    /// Refuse with [`EditorError::SaveInFlight`] until the outstanding save completes.
    RejectWhileInFlight,
}

/// An issued save request: the snapshot to persist and the graph revision it was taken at.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    id: u64,
    revision: u64,
    snapshot: ProcessSnapshot,
}

impl SaveTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn snapshot(&self) -> &ProcessSnapshot {
        &self.snapshot
    }
}

/// One editing session of one process, wired to the repository that persists it.
///
/// Dropping the session discards the in-memory graph.
pub struct EditorSession<R: ProcessRepository + ?Sized> {
    surface: EditorSurface,
    repository: Arc<R>,
    save_guard: SaveGuard,
    timeout: Option<Duration>,
    in_flight: Vec<u64>,
    next_ticket: u64,
}

async fn bounded<T, F>(
    timeout: Option<Duration>,
    process_id: &ProcessId,
    request: F,
) -> Result<T, PersistenceError>
where
    F: Future<Output = Result<T, PersistenceError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| PersistenceError::Timeout(process_id.clone()))?,
        None => request.await,
    }
}

impl<R: ProcessRepository + ?Sized> EditorSession<R> {
    /// Loads `process_id` and opens an editor on it. A process the repository
    /// does not know yet opens as an empty graph.
    pub async fn open(
        process_id: ProcessId,
        repository: Arc<R>,
        config: &EditorConfig,
    ) -> Result<Self, PersistenceError> {
        let timeout = config.request_timeout();
        let data = match bounded(timeout, &process_id, repository.load(&process_id)).await {
            Ok(data) => data,
            Err(PersistenceError::NotFound(_)) => {
                log::info!("Process '{}' not found, starting an empty graph", process_id);
                GraphData::default()
            }
            Err(e) => return Err(e),
        };

        let mut store = GraphStore::with_policy(process_id, config.connection_policy);
        store.hydrate(data.nodes, data.edges)?;

        Ok(Self {
            surface: EditorSurface::new(store, config),
            repository,
            save_guard: config.save_guard,
            timeout,
            in_flight: Vec::new(),
            next_ticket: 0,
        })
    }

    /// Wraps an existing surface, e.g. one built with a seeded random source.
    pub fn from_surface(surface: EditorSurface, repository: Arc<R>, config: &EditorConfig) -> Self {
        Self {
            surface,
            repository,
            save_guard: config.save_guard,
            timeout: config.request_timeout(),
            in_flight: Vec::new(),
            next_ticket: 0,
        }
    }

    pub fn process_id(&self) -> &ProcessId {
        self.surface.store().process_id()
    }

    pub fn surface(&self) -> &EditorSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut EditorSurface {
        &mut self.surface
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn is_dirty(&self) -> bool {
        self.surface.has_unsaved_changes()
    }

    pub fn saves_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Replaces the graph with the repository's copy. On failure the graph is
    /// kept and an error notification is posted.
    pub async fn reload(&mut self) -> bool {
        let process_id = self.process_id().clone();
        let loaded = bounded(self.timeout, &process_id, self.repository.load(&process_id)).await;
        let result = loaded.and_then(|data| {
            self.surface
                .store_mut()
                .hydrate(data.nodes, data.edges)
                .map_err(PersistenceError::from)
        });

        match result {
            Ok(()) => {
                self.surface.prune_selection();
                true
            }
            Err(e) => {
                self.surface
                    .notifications_mut()
                    .error(format!("Failed to load process '{}': {}", process_id, e));
                false
            }
        }
    }

    /// Takes a snapshot for saving and registers the request as in flight.
    pub fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        if self.save_guard == SaveGuard::RejectWhileInFlight && !self.in_flight.is_empty() {
            return Err(EditorError::SaveInFlight(self.process_id().clone()));
        }
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight.push(id);

        let store = self.surface.store();
        Ok(SaveTicket {
            id,
            revision: store.revision(),
            snapshot: store.serialize(),
        })
    }

    /// Records the outcome of a save started with [`EditorSession::begin_save`].
    ///
    /// Success clears the dirty flag unless the graph changed after the ticket
    /// was taken. Failure leaves the graph and the flag alone. Returns whether
    /// the save succeeded.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<(), PersistenceError>,
    ) -> Result<bool, EditorError> {
        let index = self
            .in_flight
            .iter()
            .position(|id| *id == ticket.id)
            .ok_or(EditorError::UnknownSaveTicket(ticket.id))?;
        self.in_flight.remove(index);

        match result {
            Ok(()) => {
                if self.surface.store().revision() == ticket.revision {
                    self.surface.store_mut().mark_clean();
                } else {
                    log::debug!(
                        "Graph changed while save {} was in flight; keeping it dirty",
                        ticket.id
                    );
                }
                self.surface.notifications_mut().success("Process saved");
                Ok(true)
            }
            Err(e) => {
                self.surface
                    .notifications_mut()
                    .error(format!("Failed to save process: {}", e));
                Ok(false)
            }
        }
    }

    /// Saves the current graph. Returns whether the save succeeded; either way
    /// the user is notified.
    pub async fn save(&mut self) -> bool {
        let ticket = match self.begin_save() {
            Ok(ticket) => ticket,
            Err(e) => {
                self.surface.notifications_mut().error(e.to_string());
                return false;
            }
        };

        let process_id = self.process_id().clone();
        let result = bounded(
            self.timeout,
            &process_id,
            self.repository.save(ticket.snapshot()),
        )
        .await;

        self.complete_save(ticket, result).unwrap_or(false)
    }

    /// Deletes the whole process and ends the session.
    ///
    /// On failure the session is handed back with an error notification.
    pub async fn delete_process(mut self) -> Result<ProcessId, Self> {
        let process_id = self.process_id().clone();
        match bounded(self.timeout, &process_id, self.repository.delete(&process_id)).await {
            Ok(()) => {
                log::info!("Deleted process '{}'", process_id);
                Ok(process_id)
            }
            Err(e) => {
                self.surface
                    .notifications_mut()
                    .error(format!("Failed to delete process '{}': {}", process_id, e));
                Err(self)
            }
        }
    }
}
