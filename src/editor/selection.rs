use crate::model::NodeId;

/// Which node, if any, has the attribute panel open.
///
/// Selecting another node replaces the selection; there is no stacking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    NodeSelected(NodeId),
}

impl Selection {
    pub fn selected(&self) -> Option<&NodeId> {
        match self {
            Selection::Idle => None,
            Selection::NodeSelected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected() == Some(id)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    pub(crate) fn select(&mut self, id: NodeId) {
        *self = Selection::NodeSelected(id);
    }

    pub(crate) fn clear(&mut self) {
        *self = Selection::Idle;
    }
}
