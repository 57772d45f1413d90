//! # procflow - Process Workflow Graph Model
//!
//! **procflow** is the in-memory model behind a visual process editor: a fixed
//! catalog of node kinds, a graph store that owns every node and edge of one
//! process, and an editor surface that turns user gestures into store
//! operations. Persistence is delegated to a pluggable repository.
//!
//! ## Core Workflow
//!
//! 1.  **Open a session**: `EditorSession::open` loads a process from a
//!     [`ProcessRepository`](persistence::ProcessRepository) (or starts empty for a new one).
//! 2.  **Edit**: apply [`Gesture`](editor::Gesture)s, or call the surface methods
//!     directly. Every effective change marks the graph dirty.
//! 3.  **Save**: `EditorSession::save` serializes the graph and hands it to the
//!     repository. Success clears the dirty flag; failure leaves everything as
//!     it was and posts a notification.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use procflow::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let repository = Arc::new(InMemoryRepository::new());
//! let config = EditorConfig::default();
//! let mut session =
//!     EditorSession::open(ProcessId::new("invoice-approval"), repository, &config).await?;
//!
//! let surface = session.surface_mut();
//! let start = surface.add_node_at(NodeKind::Start, Position::new(0.0, 0.0));
//! let review = surface.add_node_at(NodeKind::Approval, Position::new(0.0, 120.0));
//! surface.connect(HandleRef::node(start), HandleRef::node(review.clone()))?;
//!
//! surface.select(&review);
//! surface.edit_selected(PanelInput {
//!     assignee: Some("finance-lead".to_string()),
//!     time_limit: Some("24".to_string()),
//!     ..Default::default()
//! })?;
//!
//! assert!(session.is_dirty());
//! if session.save().await {
//!     println!("Saved {} node(s)", session.surface().store().nodes().len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod model;
pub mod persistence;
pub mod prelude;
pub mod ui;
