use crate::catalog::{AttributeField, NodeKind, attribute_fields};
use crate::error::EditorError;
use crate::model::{AttributePatch, Node, NodeAttributes, NodeId};

/// Current value of one panel field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    OptionalText(Option<String>),
    Hours(Option<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelField {
    pub field: AttributeField,
    pub value: FieldValue,
}

/// What the attribute side panel shows for the selected node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub node_id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub fields: Vec<PanelField>,
}

impl PanelView {
    /// Builds the view from the fields the catalog declares for the node's kind.
    pub fn for_node(node: &Node) -> Self {
        let attributes = node.attributes();
        let fields = attribute_fields(node.kind())
            .iter()
            .filter_map(|field| {
                field_value(attributes, *field).map(|value| PanelField {
                    field: *field,
                    value,
                })
            })
            .collect();

        Self {
            node_id: node.id().clone(),
            kind: node.kind(),
            label: node.label.clone(),
            fields,
        }
    }

    pub fn value(&self, field: AttributeField) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.value)
    }
}

fn field_value(attributes: &NodeAttributes, field: AttributeField) -> Option<FieldValue> {
    let common = attributes.common();
    let value = match field {
        AttributeField::Description => FieldValue::Text(common.description.clone()),
        AttributeField::Category => FieldValue::Text(common.category.clone()),
        AttributeField::Required => FieldValue::Flag(common.required),
        AttributeField::DefaultValue => FieldValue::Text(common.default_value.clone()),
        AttributeField::Assignee => FieldValue::OptionalText(attributes.approval()?.assignee.clone()),
        AttributeField::TimeLimitHours => {
            FieldValue::Hours(attributes.approval()?.time_limit_hours)
        }
    };
    Some(value)
}

/// Raw form input from the side panel, as typed by the user.
///
/// Fields left as `None` were not touched. An empty assignee or time limit
/// clears the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelInput {
    pub label: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<String>,
    pub assignee: Option<String>,
    pub time_limit: Option<String>,
}

impl PanelInput {
    /// Converts the form input into a patch, validating typed fields.
    pub fn into_patch(self) -> Result<AttributePatch, EditorError> {
        let assignee = self.assignee.map(|raw| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });
        let time_limit_hours = self.time_limit.map(|raw| parse_hours(&raw)).transpose()?;

        Ok(AttributePatch {
            label: self.label,
            description: self.description,
            category: self.category,
            required: self.required,
            default_value: self.default_value,
            assignee,
            time_limit_hours,
        })
    }
}

fn parse_hours(raw: &str) -> Result<Option<u32>, EditorError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EditorError::InvalidFieldValue {
            field: AttributeField::TimeLimitHours.name(),
            value: raw.to_string(),
            message: "expected a whole, non-negative number of hours".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    #[test]
    fn test_approval_panel_lists_extra_fields() {
        let node = Node::new(
            NodeId::new("a"),
            NodeKind::Approval,
            "Manager sign-off",
            Position::default(),
        );
        let view = PanelView::for_node(&node);
        assert_eq!(view.fields.len(), 6);
        assert_eq!(
            view.value(AttributeField::TimeLimitHours),
            Some(&FieldValue::Hours(None))
        );

        let plain = Node::new(NodeId::new("p"), NodeKind::Report, "Report", Position::default());
        let view = PanelView::for_node(&plain);
        assert_eq!(view.fields.len(), 4);
        assert!(view.value(AttributeField::Assignee).is_none());
    }

    #[test]
    fn test_time_limit_parsing() {
        let patch = PanelInput {
            time_limit: Some(" 48 ".to_string()),
            assignee: Some("  ".to_string()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.time_limit_hours, Some(Some(48)));
        assert_eq!(patch.assignee, Some(None));

        let err = PanelInput {
            time_limit: Some("-3".to_string()),
            ..Default::default()
        }
        .into_patch()
        .unwrap_err();
        assert!(matches!(
            err,
            EditorError::InvalidFieldValue {
                field: "time_limit_hours",
                ..
            }
        ));
    }
}
