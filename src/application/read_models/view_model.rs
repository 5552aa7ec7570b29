use super::render_graph::RenderGraph;
use super::risk_overlay::RiskOverlay;
use crate::system_state::domain::{RiskContribution, RiskLevel, Severity};
use serde::Serialize;

/// One row of the issue panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueView {
    pub code: String,
    pub severity: Severity,
    pub title: String,
    pub suggestion: String,
}

/// Header figures for the static summary panels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub headline: &'static str,
    pub ready: bool,
    pub risk_score_total: u8,
    pub risk_level: RiskLevel,
    pub issue_count: usize,
    /// Per-code contributions in producer order
    pub breakdown: Vec<RiskContribution>,
    pub issues: Vec<IssueView>,
    pub version: String,
    pub timestamp: String,
}

/// Everything derived from one accepted snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub summary: SummaryView,
    pub graph: RenderGraph,
    pub overlay: RiskOverlay,
}
