use crate::error::ConversionError;
use serde::{Deserialize, Serialize};

fn default_node_type() -> String {
    "custom".to_string()
}

/// Canvas coordinates of a UI node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UiPosition {
    pub x: f64,
    pub y: f64,
}

/// UI node payload: label, kind and the attribute fields edited in the side panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiNodeData {
    pub label: String,
    #[serde(alias = "node_type", alias = "kind")]
    pub node_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, alias = "default_value")]
    pub default_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, alias = "time_limit", skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

/// UI node as rendered by the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    pub id: String,
    #[serde(rename = "type", default = "default_node_type")]
    pub node_type: String,
    pub position: UiPosition,
    pub data: UiNodeData,
}

/// UI edge connecting two node handles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    #[serde(default, alias = "source_handle", skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    pub target: String,
    #[serde(default, alias = "target_handle", skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// Complete canvas graph, as posted by the browser to the save endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiGraph {
    #[serde(default)]
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub edges: Vec<UiEdge>,
}

impl UiGraph {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConversionError::ValidationError(e.to_string()))
    }
}
