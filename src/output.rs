//! JSON shapes exchanged with the JavaScript host.
//!
//! `GraphInput` is what the host sends to load a graph; `LayoutOutput` is
//! what every `step()` returns for rendering.

use serde::{Deserialize, Serialize};

use crate::engine::PassReport;
use crate::graph::Point;
use crate::params::PropertyValue;

/// A graph as sent by the host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphInput {
    #[serde(default)]
    pub directed: bool,
    pub nodes: Vec<NodeInput>,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeInput {
    pub id: String,
    /// Missing coordinates mean the host has no position for this node.
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeInput {
    pub from: String,
    pub to: String,
}

/// A node position after a pass
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Error information for the host UI
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined output of one step
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeOutput>,
    /// Node ids per tier, tier 1 first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl LayoutOutput {
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(ErrorInfo {
                message: message.into(),
            }),
            ..Self::default()
        }
    }

    /// Build the step output from a finished pass. Nodes without a
    /// position are left out.
    pub fn from_pass(report: PassReport, positions: Vec<(String, Option<Point>)>) -> Self {
        Self {
            root: Some(report.root_id),
            nodes: positions
                .into_iter()
                .filter_map(|(id, pos)| pos.map(|p| NodeOutput { id, x: p.x, y: p.y }))
                .collect(),
            tiers: report.tiers,
            error: None,
        }
    }
}

/// Parse a property value sent by the host: a JSON number or string.
pub fn parse_property_value(json: &str) -> Result<PropertyValue, serde_json::Error> {
    serde_json::from_str(json)
}
