use super::{Edge, Issue, Node};
use crate::shared::error::SyncError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound of the aggregate risk score
pub const MAX_RISK_SCORE: u8 = 100;

/// One entry of the producer's risk breakdown (issue code -> contribution)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskContribution {
    pub code: String,
    pub value: u32,
}

/// Snapshot aggregate: the authoritative scan result at one point in time
///
/// A Snapshot is immutable once constructed. Construction validates the
/// structural invariants (unique node ids, edges referencing known nodes,
/// bounded risk score), so every Snapshot that exists is renderable.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    issues: Vec<Issue>,
    risk_score_total: u8,
    risk_breakdown: Vec<RiskContribution>,
    version: String,
    timestamp: String,
    change_token: Option<String>,
}

impl Snapshot {
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        issues: Vec<Issue>,
        risk_score_total: i64,
        version: String,
        timestamp: String,
    ) -> Result<Self, SyncError> {
        let risk_score_total = u8::try_from(risk_score_total)
            .ok()
            .filter(|score| *score <= MAX_RISK_SCORE)
            .ok_or_else(|| {
                SyncError::malformed(format!(
                    "risk_score_total {} is outside 0..={}",
                    risk_score_total, MAX_RISK_SCORE
                ))
            })?;

        let mut ids = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if node.id().is_empty() {
                return Err(SyncError::malformed("node id must not be empty"));
            }
            if !ids.insert(node.id()) {
                return Err(SyncError::malformed(format!(
                    "duplicate node id detected: {}",
                    node.id()
                )));
            }
        }

        for edge in &edges {
            for endpoint in [edge.from(), edge.to()] {
                if !ids.contains(endpoint) {
                    return Err(SyncError::malformed(format!(
                        "edge {} references unknown node '{}'",
                        edge.render_id(),
                        endpoint
                    )));
                }
            }
        }

        if let Some(position) = issues.iter().position(|issue| issue.code().is_empty()) {
            return Err(SyncError::malformed(format!(
                "issues[{}].code must not be empty",
                position
            )));
        }

        Ok(Self {
            nodes,
            edges,
            issues,
            risk_score_total,
            risk_breakdown: Vec::new(),
            version,
            timestamp,
            change_token: None,
        })
    }

    pub fn with_risk_breakdown(mut self, breakdown: Vec<RiskContribution>) -> Self {
        self.risk_breakdown = breakdown;
        self
    }

    /// Attaches the cache-validation token; empty tokens are treated as absent
    pub fn with_change_token(mut self, token: Option<String>) -> Self {
        self.change_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn risk_score_total(&self) -> u8 {
        self.risk_score_total
    }

    pub fn risk_breakdown(&self) -> &[RiskContribution] {
        &self.risk_breakdown
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn change_token(&self) -> Option<&str> {
        self.change_token.as_deref()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Capture time, when the producer emitted a valid RFC 3339 timestamp
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// True when `self` was captured strictly before `other`.
    /// Unparseable timestamps never count as older.
    pub fn is_older_than(&self, other: &Snapshot) -> bool {
        match (self.captured_at(), other.captured_at()) {
            (Some(mine), Some(theirs)) => mine < theirs,
            _ => false,
        }
    }
}
