//! Render graph structs handed to the graph-drawing surface
//!
//! Everything here is derived data: rebuilt wholesale from a snapshot, never
//! patched in place.

use crate::system_state::domain::RiskLevel;
use serde::Serialize;

/// Top-left anchored 2D position in renderer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Visual emphasis applied around a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    None,
    Warning,
    Critical,
    /// Conflict participation; wins over risk-driven emphasis
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub border: &'static str,
    pub background: &'static str,
    pub color: &'static str,
    pub emphasis: Emphasis,
    pub box_shadow: &'static str,
    pub animation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub layer: u8,
    pub position: Position,
    pub risk: RiskLevel,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub label_fill: &'static str,
    pub label_weight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: &'static str,
    pub highlighted: bool,
    pub style: EdgeStyle,
}

/// Positioned, styled node/edge structure ready for drawing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderGraph {
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&RenderEdge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Node ids of one layer, left to right
    pub fn layer_ids(&self, layer: u8) -> Vec<&str> {
        let mut in_layer: Vec<&RenderNode> =
            self.nodes.iter().filter(|node| node.layer == layer).collect();
        in_layer.sort_by_key(|node| node.position.x);
        in_layer.into_iter().map(|node| node.id.as_str()).collect()
    }
}
