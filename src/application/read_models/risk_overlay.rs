use crate::system_state::domain::RiskLevel;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-node risk classification plus the conflict highlight set
///
/// Ordered collections keep the serialized form stable across rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskOverlay {
    pub levels: BTreeMap<String, RiskLevel>,
    pub highlighted_nodes: BTreeSet<String>,
    pub highlighted_edges: BTreeSet<String>,
}

impl RiskOverlay {
    pub fn level_for(&self, node_id: &str) -> RiskLevel {
        self.levels.get(node_id).copied().unwrap_or(RiskLevel::None)
    }

    pub fn is_node_highlighted(&self, node_id: &str) -> bool {
        self.highlighted_nodes.contains(node_id)
    }

    pub fn is_edge_highlighted(&self, edge_id: &str) -> bool {
        self.highlighted_edges.contains(edge_id)
    }

    /// Union of highlighted node and edge ids
    pub fn highlight_set(&self) -> BTreeSet<&str> {
        self.highlighted_nodes
            .iter()
            .chain(self.highlighted_edges.iter())
            .map(String::as_str)
            .collect()
    }
}
