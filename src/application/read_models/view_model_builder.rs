//! Builder for constructing a ViewModel from a Snapshot
//!
//! The transform is pure and synchronous: the same snapshot always yields the
//! same view model, down to the serialized bytes.

use super::render_graph::{
    EdgeStyle, Emphasis, NodeStyle, Position, RenderEdge, RenderGraph, RenderNode,
};
use super::risk_overlay::RiskOverlay;
use super::view_model::{IssueView, SummaryView, ViewModel};
use crate::system_state::domain::{NodeStatus, RiskLevel, Snapshot};
use crate::system_state::policies::{LayerRanking, RiskThresholds};
use std::collections::{BTreeSet, HashMap};

const LAYER_SPACING: i32 = 150;
const COLUMN_SPACING: i32 = 180;
const LEFT_MARGIN: i32 = 0;

const BORDER_ACTIVE: &str = "#10b981";
const BORDER_CONFLICT: &str = "#f97316";
const BORDER_INACTIVE: &str = "#6b7280";
const NODE_BACKGROUND: &str = "#111827";
const NODE_TEXT: &str = "#e2e8f0";

const SHADOW_CONFLICT: &str = "0 0 0 4px rgba(249, 115, 22, 0.25)";
const SHADOW_CRITICAL: &str = "0 0 14px #ff4d4d";
const SHADOW_WARNING: &str = "0 0 10px #f59e0b";
const PULSE_CRITICAL: &str = "pulseCritical 1.2s infinite";
const NONE: &str = "none";

const EDGE_STROKE: &str = "#94a3b8";
const EDGE_STROKE_HIGHLIGHT: &str = "#f97316";
const EDGE_LABEL_FILL: &str = "#cbd5e1";
const EDGE_LABEL_WEIGHT: u16 = 600;

const HEADLINE_READY: &str = "Ready for Takeoff";
const HEADLINE_RISK: &str = "Flight Risk Detected";

/// Builder for constructing a ViewModel (render graph + risk overlay)
///
/// Style derivation is total: every node and edge receives a style, unknown
/// node types land in the fallback layer.
pub struct ViewModelBuilder;

impl ViewModelBuilder {
    pub fn build(snapshot: &Snapshot) -> ViewModel {
        let edge_ids = Self::assign_edge_ids(snapshot);
        let overlay = Self::build_overlay(snapshot, &edge_ids);
        let graph = Self::build_graph(snapshot, &overlay, &edge_ids);
        let summary = Self::build_summary(snapshot);

        ViewModel {
            summary,
            graph,
            overlay,
        }
    }

    /// Renderer ids for edges, in edge order.
    /// Repeated `(from, to, relation)` triples get a `#n` suffix.
    fn assign_edge_ids(snapshot: &Snapshot) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        snapshot
            .edges()
            .iter()
            .map(|edge| {
                let base = edge.render_id();
                let count = seen.entry(base.clone()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    base
                } else {
                    format!("{}#{}", base, count)
                }
            })
            .collect()
    }

    fn build_overlay(snapshot: &Snapshot, edge_ids: &[String]) -> RiskOverlay {
        let level = RiskThresholds::for_snapshot(snapshot);
        let levels = snapshot
            .nodes()
            .iter()
            .map(|node| (node.id().to_string(), level))
            .collect();

        let conflicted: BTreeSet<&str> = snapshot
            .nodes()
            .iter()
            .filter(|node| node.is_conflict())
            .map(|node| node.id())
            .collect();

        let mut highlighted_nodes: BTreeSet<String> =
            conflicted.iter().map(|id| id.to_string()).collect();
        let mut highlighted_edges = BTreeSet::new();

        for (edge, id) in snapshot.edges().iter().zip(edge_ids) {
            if conflicted.contains(edge.from()) || conflicted.contains(edge.to()) {
                highlighted_edges.insert(id.clone());
                highlighted_nodes.insert(edge.from().to_string());
                highlighted_nodes.insert(edge.to().to_string());
            }
        }

        RiskOverlay {
            levels,
            highlighted_nodes,
            highlighted_edges,
        }
    }

    fn build_graph(snapshot: &Snapshot, overlay: &RiskOverlay, edge_ids: &[String]) -> RenderGraph {
        let mut columns = [0i32; LayerRanking::LAYER_COUNT];

        let nodes = snapshot
            .nodes()
            .iter()
            .map(|node| {
                let layer = LayerRanking::layer_for(node.node_type());
                let column = &mut columns[usize::from(layer)];
                let position = Position {
                    x: LEFT_MARGIN + *column * COLUMN_SPACING,
                    y: i32::from(layer) * LAYER_SPACING,
                };
                *column += 1;

                let risk = overlay.level_for(node.id());

                RenderNode {
                    id: node.id().to_string(),
                    label: format!(
                        "{} ({})",
                        node.label(),
                        node.node_type().as_str().to_uppercase()
                    ),
                    layer,
                    position,
                    risk,
                    style: Self::node_style(node.status(), risk),
                }
            })
            .collect();

        let edges = snapshot
            .edges()
            .iter()
            .zip(edge_ids)
            .map(|(edge, id)| {
                let highlighted = overlay.is_edge_highlighted(id);
                RenderEdge {
                    id: id.clone(),
                    source: edge.from().to_string(),
                    target: edge.to().to_string(),
                    label: edge.relation().as_str(),
                    highlighted,
                    style: EdgeStyle {
                        stroke: if highlighted {
                            EDGE_STROKE_HIGHLIGHT
                        } else {
                            EDGE_STROKE
                        },
                        label_fill: EDGE_LABEL_FILL,
                        label_weight: EDGE_LABEL_WEIGHT,
                    },
                }
            })
            .collect();

        RenderGraph { nodes, edges }
    }

    /// Conflict emphasis follows the node's own status; neighbours that are
    /// only highlighted through a conflict edge keep their risk emphasis.
    fn node_style(status: NodeStatus, risk: RiskLevel) -> NodeStyle {
        let border = match status {
            NodeStatus::Active => BORDER_ACTIVE,
            NodeStatus::Conflict => BORDER_CONFLICT,
            NodeStatus::Inactive => BORDER_INACTIVE,
        };

        let emphasis = if status == NodeStatus::Conflict {
            Emphasis::Conflict
        } else {
            match risk {
                RiskLevel::Critical => Emphasis::Critical,
                RiskLevel::Warning => Emphasis::Warning,
                RiskLevel::Low | RiskLevel::None => Emphasis::None,
            }
        };

        let box_shadow = match emphasis {
            Emphasis::Conflict => SHADOW_CONFLICT,
            Emphasis::Critical => SHADOW_CRITICAL,
            Emphasis::Warning => SHADOW_WARNING,
            Emphasis::None => NONE,
        };

        NodeStyle {
            border,
            background: NODE_BACKGROUND,
            color: NODE_TEXT,
            emphasis,
            box_shadow,
            animation: if risk == RiskLevel::Critical {
                PULSE_CRITICAL
            } else {
                NONE
            },
        }
    }

    fn build_summary(snapshot: &Snapshot) -> SummaryView {
        let ready = !snapshot.has_issues();
        SummaryView {
            headline: if ready { HEADLINE_READY } else { HEADLINE_RISK },
            ready,
            risk_score_total: snapshot.risk_score_total(),
            risk_level: RiskThresholds::for_snapshot(snapshot),
            issue_count: snapshot.issues().len(),
            breakdown: snapshot.risk_breakdown().to_vec(),
            issues: snapshot
                .issues()
                .iter()
                .map(|issue| IssueView {
                    code: issue.code().to_string(),
                    severity: issue.severity(),
                    title: issue.title().to_string(),
                    suggestion: issue.suggestion().to_string(),
                })
                .collect(),
            version: snapshot.version().to_string(),
            timestamp: snapshot.timestamp().to_string(),
        }
    }
}
