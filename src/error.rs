use crate::catalog::NodeKind;
use crate::model::{EdgeId, NodeId, ProcessId};
use thiserror::Error;

/// Errors raised by the graph store when an operation cannot be applied.
///
/// None of these leave the store partially modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' not found in the graph")]
    NodeNotFound(NodeId),

    #[error("Edge '{0}' not found in the graph")]
    EdgeNotFound(EdgeId),

    #[error("Unknown node kind: '{0}'")]
    UnknownKind(String),

    #[error("Field '{field}' does not apply to {kind} nodes")]
    FieldNotApplicable { kind: NodeKind, field: &'static str },

    #[error("Connection from '{source_node}' to '{target_node}' was rejected: {reason}")]
    ConnectionRejected {
        source_node: NodeId,
        target_node: NodeId,
        reason: ConnectionRejection,
    },

    #[error("Invalid graph data: {0}")]
    InvalidGraph(String),
}

/// Why a connection policy refused an edge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionRejection {
    #[error("self-loops are not allowed")]
    SelfLoop,

    #[error("an edge between these handles already exists")]
    ParallelEdge,

    #[error("the edge would close a cycle")]
    Cycle,

    #[error("{kind} nodes have no outgoing handle '{handle}'")]
    UnknownSourceHandle { kind: NodeKind, handle: String },

    #[error("{kind} nodes have several outgoing handles; one must be named")]
    AmbiguousSourceHandle { kind: NodeKind },

    #[error("{kind} nodes do not accept incoming connections on '{handle}'")]
    UnknownTargetHandle { kind: NodeKind, handle: String },
}

/// Errors surfaced by the editor surface and session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("No node is selected")]
    NothingSelected,

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        message: String,
    },

    #[error("A save for process '{0}' is already in flight")]
    SaveInFlight(ProcessId),

    #[error("Save ticket {0} does not belong to an outstanding save")]
    UnknownSaveTicket(u64),

    #[error("Viewport must have a positive size, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

/// Errors reported by a process repository.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("Process '{0}' not found")]
    NotFound(ProcessId),

    #[error("Invalid process id '{0}'")]
    InvalidProcessId(String),

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Request for process '{0}' timed out")]
    Timeout(ProcessId),

    #[error("Stored graph is invalid: {0}")]
    Corrupt(#[from] GraphError),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Errors that can occur when converting a foreign graph format into procflow's model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Node '{node_id}' has an unknown node type '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Invalid data: {0}")]
    ValidationError(String),

    #[error("Failed to parse graph JSON: {0}")]
    JsonParseError(String),
}

/// Errors that can occur while loading an editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
