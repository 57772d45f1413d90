use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of node kinds a process graph may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    End,
    Process,
    Decision,
    Data,
    Approval,
    Document,
    Notification,
    Report,
    Assignment,
}

impl NodeKind {
    /// Every kind, in palette order.
    pub const ALL: [NodeKind; 10] = [
        NodeKind::Start,
        NodeKind::End,
        NodeKind::Process,
        NodeKind::Decision,
        NodeKind::Data,
        NodeKind::Approval,
        NodeKind::Document,
        NodeKind::Notification,
        NodeKind::Report,
        NodeKind::Assignment,
    ];

    /// The lowercase wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Decision => "decision",
            NodeKind::Data => "data",
            NodeKind::Approval => "approval",
            NodeKind::Document => "document",
            NodeKind::Notification => "notification",
            NodeKind::Report => "report",
            NodeKind::Assignment => "assignment",
        }
    }

    /// Label given to a freshly placed node of this kind.
    pub fn default_label(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::End => "End",
            NodeKind::Process => "Process",
            NodeKind::Decision => "Decision",
            NodeKind::Data => "Data",
            NodeKind::Approval => "Approval",
            NodeKind::Document => "Document",
            NodeKind::Notification => "Notification",
            NodeKind::Report => "Report",
            NodeKind::Assignment => "Assignment",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::End)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| GraphError::UnknownKind(s.to_string()))
    }
}
