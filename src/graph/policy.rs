use crate::catalog::{HandleResolution, NodeKind, handle_spec};
use crate::error::ConnectionRejection;
use serde::{Deserialize, Serialize};

/// Which connections `GraphStore::connect` accepts.
///
/// The editor historically accepted any pair of existing nodes, so
/// [`ConnectionPolicy::permissive`] is the default. Workflows may legitimately
/// loop back (rework, resubmission), which is why cycles are a separate switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPolicy {
    pub allow_self_loops: bool,
    pub allow_parallel_edges: bool,
    pub allow_cycles: bool,
    /// Check handle ids against the catalog's handle layout for each kind.
    pub enforce_handles: bool,
}

impl ConnectionPolicy {
    /// Only checks that both nodes exist.
    pub fn permissive() -> Self {
        Self {
            allow_self_loops: true,
            allow_parallel_edges: true,
            allow_cycles: true,
            enforce_handles: false,
        }
    }

    /// Rejects self-loops, parallel edges, cycles and handle mismatches.
    pub fn strict() -> Self {
        Self {
            allow_self_loops: false,
            allow_parallel_edges: false,
            allow_cycles: false,
            enforce_handles: true,
        }
    }

    pub(crate) fn check_handles(
        &self,
        source_kind: NodeKind,
        source_handle: Option<&str>,
        target_kind: NodeKind,
        target_handle: Option<&str>,
    ) -> Result<(), ConnectionRejection> {
        if !self.enforce_handles {
            return Ok(());
        }

        match handle_spec(source_kind).resolve_source(source_handle) {
            HandleResolution::Found(_) => {}
            HandleResolution::Ambiguous => {
                return Err(ConnectionRejection::AmbiguousSourceHandle { kind: source_kind });
            }
            HandleResolution::Missing => {
                return Err(ConnectionRejection::UnknownSourceHandle {
                    kind: source_kind,
                    handle: source_handle.unwrap_or_default().to_string(),
                });
            }
        }

        match handle_spec(target_kind).resolve_target(target_handle) {
            HandleResolution::Found(_) => Ok(()),
            _ => Err(ConnectionRejection::UnknownTargetHandle {
                kind: target_kind,
                handle: target_handle.unwrap_or_default().to_string(),
            }),
        }
    }
}

impl Default for ConnectionPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}
