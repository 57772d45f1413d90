use super::{Notifications, PanelInput, PanelView, Selection, Viewport};
use crate::catalog::NodeKind;
use crate::config::EditorConfig;
use crate::error::{EditorError, GraphError};
use crate::graph::GraphStore;
use crate::model::{AttributePatch, Edge, EdgeId, HandleRef, Node, NodeId, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A user gesture on the editing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// A palette entry dragged and dropped onto the canvas.
    DropFromPalette { kind: NodeKind, position: Position },
    /// A palette entry clicked instead of dragged.
    ClickPalette { kind: NodeKind },
    DragNode { node: NodeId, position: Position },
    ConnectHandles { source: HandleRef, target: HandleRef },
    ClickNode(NodeId),
    ClosePanel,
    DeleteNode(NodeId),
    DeleteSelected,
    DeleteEdge(EdgeId),
    DuplicateNode(NodeId),
    EditSelected(PanelInput),
}

/// What a gesture did to the graph or the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    NodeAdded(NodeId),
    NodeMoved(NodeId),
    Connected(EdgeId),
    Selected(NodeId),
    PanelClosed,
    NodeDeleted(NodeId),
    EdgeDeleted(EdgeId),
    NodeDuplicated(NodeId),
    NodeUpdated(NodeId),
    /// The gesture addressed something missing or was refused; nothing changed.
    Ignored,
}

/// The interactive layer over a [`GraphStore`].
///
/// Owns the store for the lifetime of an editing session, tracks the single
/// selected node, and turns gestures into store operations.
#[derive(Debug)]
pub struct EditorSurface {
    store: GraphStore,
    selection: Selection,
    viewport: Viewport,
    duplicate_offset: Position,
    notifications: Notifications,
    rng: StdRng,
}

impl EditorSurface {
    pub fn new(store: GraphStore, config: &EditorConfig) -> Self {
        Self::with_rng(store, config, StdRng::from_os_rng())
    }

    /// Same as [`EditorSurface::new`] with a caller-supplied random source.
    pub fn with_rng(mut store: GraphStore, config: &EditorConfig, rng: StdRng) -> Self {
        store.set_policy(config.connection_policy);
        Self {
            store,
            selection: Selection::Idle,
            viewport: config.viewport,
            duplicate_offset: config.duplicate_offset,
            notifications: Notifications::new(),
            rng,
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replaces the visible area. A viewport without a positive size is refused.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), EditorError> {
        if !viewport.has_positive_size() {
            return Err(EditorError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Drives the "unsaved changes" indicator.
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.is_dirty()
    }

    /// Places a node of `kind` with its default label at `position`.
    pub fn add_node_at(&mut self, kind: NodeKind, position: Position) -> NodeId {
        self.store.add_node(kind, kind.default_label(), position)
    }

    /// Click-to-add: places a node at a random point inside the viewport.
    pub fn add_node_anywhere(&mut self, kind: NodeKind) -> NodeId {
        let position = self.viewport.random_position(&mut self.rng);
        self.add_node_at(kind, position)
    }

    pub fn move_node(&mut self, id: &NodeId, position: Position) -> bool {
        self.store.move_node(id, position)
    }

    /// Merges `patch` into a node, bypassing the side panel.
    pub fn update_node(&mut self, id: &NodeId, patch: &AttributePatch) -> Result<(), GraphError> {
        self.store.update_node(id, patch)
    }

    pub fn connect(&mut self, source: HandleRef, target: HandleRef) -> Result<EdgeId, GraphError> {
        self.store.connect(source, target)
    }

    /// Opens the panel on `id`, replacing any previous selection.
    pub fn select(&mut self, id: &NodeId) -> bool {
        if !self.store.contains_node(id) {
            log::debug!("Ignoring selection of unknown node '{}'", id);
            return false;
        }
        self.selection.select(id.clone());
        true
    }

    pub fn close_panel(&mut self) {
        self.selection.clear();
    }

    /// Deletes a node and its edges; closes the panel if it showed that node.
    pub fn delete_node(&mut self, id: &NodeId) -> Option<Node> {
        let node = self.store.delete_node(id)?;
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        Some(node)
    }

    pub fn delete_selected(&mut self) -> Result<Node, EditorError> {
        let id = self
            .selection
            .selected()
            .cloned()
            .ok_or(EditorError::NothingSelected)?;
        self.delete_node(&id)
            .ok_or(EditorError::Graph(GraphError::NodeNotFound(id)))
    }

    pub fn delete_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        self.store.disconnect(id)
    }

    pub fn duplicate_node(&mut self, id: &NodeId) -> Result<NodeId, GraphError> {
        self.store.duplicate_node(id, self.duplicate_offset)
    }

    /// The side panel contents, if a node is selected.
    pub fn panel(&self) -> Option<PanelView> {
        let id = self.selection.selected()?;
        self.store.node(id).map(PanelView::for_node)
    }

    /// Applies side-panel input to the selected node.
    pub fn edit_selected(&mut self, input: PanelInput) -> Result<NodeId, EditorError> {
        let id = self
            .selection
            .selected()
            .cloned()
            .ok_or(EditorError::NothingSelected)?;
        let patch = input.into_patch()?;
        self.store.update_node(&id, &patch)?;
        Ok(id)
    }

    /// Drops the selection if the selected node no longer exists.
    pub(crate) fn prune_selection(&mut self) {
        if let Some(id) = self.selection.selected() {
            if !self.store.contains_node(id) {
                self.selection.clear();
            }
        }
    }

    /// Applies one gesture. Failures never escape: they are logged, invalid
    /// panel input is also reported as a notification, and the gesture is
    /// reported as [`GestureOutcome::Ignored`].
    pub fn apply(&mut self, gesture: Gesture) -> GestureOutcome {
        match gesture {
            Gesture::DropFromPalette { kind, position } => {
                GestureOutcome::NodeAdded(self.add_node_at(kind, position))
            }
            Gesture::ClickPalette { kind } => GestureOutcome::NodeAdded(self.add_node_anywhere(kind)),
            Gesture::DragNode { node, position } => {
                if self.move_node(&node, position) {
                    GestureOutcome::NodeMoved(node)
                } else {
                    GestureOutcome::Ignored
                }
            }
            Gesture::ConnectHandles { source, target } => match self.connect(source, target) {
                Ok(edge) => GestureOutcome::Connected(edge),
                Err(e) => {
                    log::info!("Connection ignored: {}", e);
                    GestureOutcome::Ignored
                }
            },
            Gesture::ClickNode(node) => {
                if self.select(&node) {
                    GestureOutcome::Selected(node)
                } else {
                    GestureOutcome::Ignored
                }
            }
            Gesture::ClosePanel => {
                self.close_panel();
                GestureOutcome::PanelClosed
            }
            Gesture::DeleteNode(node) => match self.delete_node(&node) {
                Some(_) => GestureOutcome::NodeDeleted(node),
                None => GestureOutcome::Ignored,
            },
            Gesture::DeleteSelected => match self.delete_selected() {
                Ok(node) => GestureOutcome::NodeDeleted(node.id().clone()),
                Err(e) => {
                    log::debug!("Delete ignored: {}", e);
                    GestureOutcome::Ignored
                }
            },
            Gesture::DeleteEdge(edge) => match self.delete_edge(&edge) {
                Some(_) => GestureOutcome::EdgeDeleted(edge),
                None => GestureOutcome::Ignored,
            },
            Gesture::DuplicateNode(node) => match self.duplicate_node(&node) {
                Ok(copy) => GestureOutcome::NodeDuplicated(copy),
                Err(e) => {
                    log::debug!("Duplicate ignored: {}", e);
                    GestureOutcome::Ignored
                }
            },
            Gesture::EditSelected(input) => match self.edit_selected(input) {
                Ok(node) => GestureOutcome::NodeUpdated(node),
                Err(e) => {
                    self.notifications.error(e.to_string());
                    GestureOutcome::Ignored
                }
            },
        }
    }
}
