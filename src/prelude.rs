//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the procflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use procflow::prelude::*;
//!
//! let mut store = GraphStore::new(ProcessId::new("onboarding"));
//! let start = store.add_node(NodeKind::Start, "Start", Position::new(0.0, 0.0));
//! let step = store.add_node(NodeKind::Process, "Collect documents", Position::new(100.0, 0.0));
//! store.connect(HandleRef::node(start), HandleRef::node(step)).unwrap();
//!
//! let snapshot = store.serialize();
//! assert_eq!(snapshot.nodes.len(), 2);
//! assert_eq!(snapshot.edges.len(), 1);
//! ```

// Catalog
pub use crate::catalog::{AttributeField, HandleSpec, NodeKind, handle_spec, list_kinds};

// Model
pub use crate::model::{
    AttributePatch, Edge, EdgeId, HandleRef, Node, NodeAttributes, NodeId, Position, ProcessId,
};

// Graph store
pub use crate::graph::{ConnectionPolicy, GraphData, GraphReport, GraphStore, ProcessSnapshot, analyze};

// Editor
pub use crate::editor::{
    EditorSession, EditorSurface, Gesture, GestureOutcome, PanelInput, PanelView, SaveGuard,
    Selection, Viewport,
};

// Persistence
pub use crate::persistence::{FileRepository, InMemoryRepository, ProcessRepository, SnapshotFormat};

// Interop and configuration
pub use crate::config::EditorConfig;
pub use crate::ui::{IntoGraph, UiGraph};

// Error types
pub use crate::error::{ConversionError, EditorError, GraphError, PersistenceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
