use super::types::{UiEdge, UiGraph, UiNode, UiNodeData, UiPosition};
use crate::catalog::NodeKind;
use crate::error::ConversionError;
use crate::graph::GraphData;
use crate::model::{
    ApprovalAttributes, CommonAttributes, Edge, EdgeId, HandleRef, Node, NodeAttributes, NodeId,
    Position,
};

/// A trait for foreign graph formats that can be converted into a procflow `GraphData`.
///
/// Implement it on your own structs to feed graphs saved by another front-end
/// into a [`GraphStore`](crate::graph::GraphStore).
///
/// # Example
///
/// ```rust,no_run
/// use procflow::prelude::*;
/// use procflow::error::ConversionError;
///
/// struct Step { id: String, title: String }
/// struct Checklist { steps: Vec<Step> }
///
/// impl IntoGraph for Checklist {
///     fn into_graph(self) -> std::result::Result<GraphData, ConversionError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .enumerate()
///             .map(|(i, step)| {
///                 Node::new(
///                     NodeId::new(step.id),
///                     NodeKind::Process,
///                     step.title,
///                     Position::new(0.0, i as f64 * 100.0),
///                 )
///             })
///             .collect();
///         Ok(GraphData::new(nodes, vec![]))
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a procflow graph.
    fn into_graph(self) -> Result<GraphData, ConversionError>;
}

impl IntoGraph for UiGraph {
    fn into_graph(self) -> Result<GraphData, ConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(ui_node_to_node)
            .collect::<Result<Vec<_>, _>>()?;

        let edges = self
            .edges
            .into_iter()
            .map(|ui_edge| {
                let id = if ui_edge.id.is_empty() {
                    EdgeId::generate()
                } else {
                    EdgeId::new(ui_edge.id)
                };
                Edge::new(
                    id,
                    HandleRef {
                        node: NodeId::new(ui_edge.source),
                        handle: ui_edge.source_handle,
                    },
                    HandleRef {
                        node: NodeId::new(ui_edge.target),
                        handle: ui_edge.target_handle,
                    },
                )
            })
            .collect();

        let graph = GraphData::new(nodes, edges);
        graph
            .validate()
            .map_err(|e| ConversionError::ValidationError(e.to_string()))?;
        Ok(graph)
    }
}

fn ui_node_to_node(ui_node: UiNode) -> Result<Node, ConversionError> {
    let data = ui_node.data;
    let kind: NodeKind = data
        .node_type
        .parse()
        .map_err(|_| ConversionError::UnknownNodeType {
            node_id: ui_node.id.clone(),
            type_name: data.node_type.clone(),
        })?;

    let common = CommonAttributes {
        description: data.description,
        category: data.category,
        required: data.required,
        default_value: data.default_value,
    };
    let attributes = match kind {
        NodeKind::Approval => NodeAttributes::Approval(ApprovalAttributes {
            common,
            assignee: data.assignee,
            time_limit_hours: data.time_limit,
        }),
        other => {
            if data.assignee.is_some() || data.time_limit.is_some() {
                log::warn!(
                    "Dropping approval-only fields on {} node '{}'",
                    other,
                    ui_node.id
                );
            }
            NodeAttributes::with_common(other, common)
        }
    };

    Ok(Node::with_attributes(
        NodeId::new(ui_node.id),
        data.label,
        Position::new(ui_node.position.x, ui_node.position.y),
        attributes,
    ))
}

impl From<&Node> for UiNode {
    fn from(node: &Node) -> Self {
        let attributes = node.attributes();
        let common = attributes.common();
        let approval = attributes.approval();
        UiNode {
            id: node.id().to_string(),
            node_type: "custom".to_string(),
            position: UiPosition {
                x: node.position.x,
                y: node.position.y,
            },
            data: UiNodeData {
                label: node.label.clone(),
                node_type: node.kind().as_str().to_string(),
                description: common.description.clone(),
                category: common.category.clone(),
                required: common.required,
                default_value: common.default_value.clone(),
                assignee: approval.and_then(|a| a.assignee.clone()),
                time_limit: approval.and_then(|a| a.time_limit_hours),
            },
        }
    }
}

impl From<&Edge> for UiEdge {
    fn from(edge: &Edge) -> Self {
        UiEdge {
            id: edge.id.to_string(),
            source: edge.source.node.to_string(),
            source_handle: edge.source.handle.clone(),
            target: edge.target.node.to_string(),
            target_handle: edge.target.handle.clone(),
        }
    }
}

impl From<&GraphData> for UiGraph {
    fn from(graph: &GraphData) -> Self {
        UiGraph {
            nodes: graph.nodes.iter().map(UiNode::from).collect(),
            edges: graph.edges.iter().map(UiEdge::from).collect(),
        }
    }
}
