use crate::catalog::NodeKind;
use crate::error::GraphError;
use serde::{Deserialize, Serialize};

/// Fields every node kind carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommonAttributes {
    pub description: String,
    pub category: String,
    pub required: bool,
    pub default_value: String,
}

/// Fields of an approval step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApprovalAttributes {
    pub common: CommonAttributes,
    pub assignee: Option<String>,
    pub time_limit_hours: Option<u32>,
}

/// Kind-specific attribute bag. The variant *is* the node's kind, so a node
/// can never carry fields its kind does not define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeAttributes {
    Start(CommonAttributes),
    End(CommonAttributes),
    Process(CommonAttributes),
    Decision(CommonAttributes),
    Data(CommonAttributes),
    Approval(ApprovalAttributes),
    Document(CommonAttributes),
    Notification(CommonAttributes),
    Report(CommonAttributes),
    Assignment(CommonAttributes),
}

impl NodeAttributes {
    /// Empty attributes for a node of `kind`.
    pub fn defaults_for(kind: NodeKind) -> Self {
        Self::with_common(kind, CommonAttributes::default())
    }

    /// Builds attributes of `kind` around `common`; approval-only fields start empty.
    pub fn with_common(kind: NodeKind, common: CommonAttributes) -> Self {
        match kind {
            NodeKind::Start => NodeAttributes::Start(common),
            NodeKind::End => NodeAttributes::End(common),
            NodeKind::Process => NodeAttributes::Process(common),
            NodeKind::Decision => NodeAttributes::Decision(common),
            NodeKind::Data => NodeAttributes::Data(common),
            NodeKind::Approval => NodeAttributes::Approval(ApprovalAttributes {
                common,
                ..Default::default()
            }),
            NodeKind::Document => NodeAttributes::Document(common),
            NodeKind::Notification => NodeAttributes::Notification(common),
            NodeKind::Report => NodeAttributes::Report(common),
            NodeKind::Assignment => NodeAttributes::Assignment(common),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeAttributes::Start(_) => NodeKind::Start,
            NodeAttributes::End(_) => NodeKind::End,
            NodeAttributes::Process(_) => NodeKind::Process,
            NodeAttributes::Decision(_) => NodeKind::Decision,
            NodeAttributes::Data(_) => NodeKind::Data,
            NodeAttributes::Approval(_) => NodeKind::Approval,
            NodeAttributes::Document(_) => NodeKind::Document,
            NodeAttributes::Notification(_) => NodeKind::Notification,
            NodeAttributes::Report(_) => NodeKind::Report,
            NodeAttributes::Assignment(_) => NodeKind::Assignment,
        }
    }

    pub fn common(&self) -> &CommonAttributes {
        match self {
            NodeAttributes::Approval(approval) => &approval.common,
            NodeAttributes::Start(c)
            | NodeAttributes::End(c)
            | NodeAttributes::Process(c)
            | NodeAttributes::Decision(c)
            | NodeAttributes::Data(c)
            | NodeAttributes::Document(c)
            | NodeAttributes::Notification(c)
            | NodeAttributes::Report(c)
            | NodeAttributes::Assignment(c) => c,
        }
    }

    pub fn common_mut(&mut self) -> &mut CommonAttributes {
        match self {
            NodeAttributes::Approval(approval) => &mut approval.common,
            NodeAttributes::Start(c)
            | NodeAttributes::End(c)
            | NodeAttributes::Process(c)
            | NodeAttributes::Decision(c)
            | NodeAttributes::Data(c)
            | NodeAttributes::Document(c)
            | NodeAttributes::Notification(c)
            | NodeAttributes::Report(c)
            | NodeAttributes::Assignment(c) => c,
        }
    }

    pub fn approval(&self) -> Option<&ApprovalAttributes> {
        match self {
            NodeAttributes::Approval(approval) => Some(approval),
            _ => None,
        }
    }
}

/// A partial update of a node's label and attributes.
///
/// `None` leaves a field untouched. For `assignee`, `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributePatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<String>,
    pub assignee: Option<Option<String>>,
    pub time_limit_hours: Option<Option<u32>>,
}

impl AttributePatch {
    pub fn is_empty(&self) -> bool {
        *self == AttributePatch::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn assignee(mut self, assignee: Option<String>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn time_limit_hours(mut self, hours: Option<u32>) -> Self {
        self.time_limit_hours = Some(hours);
        self
    }

    /// Checks that every field set on the patch exists for `kind`.
    pub fn check_applicable(&self, kind: NodeKind) -> Result<(), GraphError> {
        if kind == NodeKind::Approval {
            return Ok(());
        }
        if self.assignee.is_some() {
            return Err(GraphError::FieldNotApplicable {
                kind,
                field: "assignee",
            });
        }
        if self.time_limit_hours.is_some() {
            return Err(GraphError::FieldNotApplicable {
                kind,
                field: "time_limit_hours",
            });
        }
        Ok(())
    }

    /// Merges the patch into `attributes`. Callers check applicability first.
    pub(crate) fn apply_to(&self, attributes: &mut NodeAttributes) {
        let common = attributes.common_mut();
        if let Some(description) = &self.description {
            common.description = description.clone();
        }
        if let Some(category) = &self.category {
            common.category = category.clone();
        }
        if let Some(required) = self.required {
            common.required = required;
        }
        if let Some(value) = &self.default_value {
            common.default_value = value.clone();
        }

        if let NodeAttributes::Approval(approval) = attributes {
            if let Some(assignee) = &self.assignee {
                approval.assignee = assignee.clone();
            }
            if let Some(hours) = self.time_limit_hours {
                approval.time_limit_hours = hours;
            }
        }
    }
}
