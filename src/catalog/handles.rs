use super::NodeKind;

pub const HANDLE_IN: &str = "in";
pub const HANDLE_OUT: &str = "out";
pub const HANDLE_YES: &str = "yes";
pub const HANDLE_NO: &str = "no";

/// Side of the node a handle is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlePosition {
    Top,
    Bottom,
    Left,
    Right,
}

/// A single connection point on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleDef {
    pub id: &'static str,
    pub label: Option<&'static str>,
    pub position: HandlePosition,
}

/// Connection capabilities of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleSpec {
    pub incoming: Option<HandleDef>,
    pub outgoing: &'static [HandleDef],
}

const INCOMING: HandleDef = HandleDef {
    id: HANDLE_IN,
    label: None,
    position: HandlePosition::Top,
};

const SINGLE_OUT: [HandleDef; 1] = [HandleDef {
    id: HANDLE_OUT,
    label: None,
    position: HandlePosition::Bottom,
}];

const DECISION_OUT: [HandleDef; 2] = [
    HandleDef {
        id: HANDLE_YES,
        label: Some("Yes"),
        position: HandlePosition::Left,
    },
    HandleDef {
        id: HANDLE_NO,
        label: Some("No"),
        position: HandlePosition::Right,
    },
];

/// Returns the handle layout for `kind`.
pub fn handle_spec(kind: NodeKind) -> HandleSpec {
    match kind {
        NodeKind::Start => HandleSpec {
            incoming: None,
            outgoing: &SINGLE_OUT,
        },
        NodeKind::End => HandleSpec {
            incoming: Some(INCOMING),
            outgoing: &[],
        },
        NodeKind::Decision => HandleSpec {
            incoming: Some(INCOMING),
            outgoing: &DECISION_OUT,
        },
        _ => HandleSpec {
            incoming: Some(INCOMING),
            outgoing: &SINGLE_OUT,
        },
    }
}

/// Result of resolving an optional handle id against a kind's handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResolution {
    Found(HandleDef),
    Missing,
    Ambiguous,
}

impl HandleSpec {
    pub fn accepts_incoming(&self) -> bool {
        self.incoming.is_some()
    }

    pub fn outgoing_count(&self) -> usize {
        self.outgoing.len()
    }

    /// True when the kind fans out to more than one labelled branch.
    pub fn is_multi_output(&self) -> bool {
        self.outgoing.len() > 1
    }

    /// Resolves an outgoing handle. `None` means "the only outgoing handle".
    pub fn resolve_source(&self, handle: Option<&str>) -> HandleResolution {
        match handle {
            Some(id) => self
                .outgoing
                .iter()
                .find(|h| h.id == id)
                .map_or(HandleResolution::Missing, |h| HandleResolution::Found(*h)),
            None => match self.outgoing {
                [only] => HandleResolution::Found(*only),
                [] => HandleResolution::Missing,
                _ => HandleResolution::Ambiguous,
            },
        }
    }

    /// Resolves an incoming handle. `None` means "the incoming handle".
    pub fn resolve_target(&self, handle: Option<&str>) -> HandleResolution {
        match (self.incoming, handle) {
            (Some(incoming), None) => HandleResolution::Found(incoming),
            (Some(incoming), Some(id)) if incoming.id == id => HandleResolution::Found(incoming),
            _ => HandleResolution::Missing,
        }
    }
}
