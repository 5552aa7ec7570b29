use crate::system_state::domain::{RiskLevel, Snapshot};

/// RiskThresholds policy mapping the aggregate risk score to a level
///
/// The producer reports risk as one process-wide score, so every node of a
/// snapshot inherits the same level. Per-node severity is deliberately not
/// inferred from issue contents.
pub struct RiskThresholds;

impl RiskThresholds {
    pub const CRITICAL: u8 = 70;
    pub const WARNING: u8 = 30;

    /// Classifies a score.
    /// Without any issue the level is `None`, whatever the score says.
    pub fn classify(risk_score_total: u8, has_issues: bool) -> RiskLevel {
        if !has_issues {
            return RiskLevel::None;
        }
        if risk_score_total >= Self::CRITICAL {
            RiskLevel::Critical
        } else if risk_score_total >= Self::WARNING {
            RiskLevel::Warning
        } else {
            RiskLevel::Low
        }
    }

    pub fn for_snapshot(snapshot: &Snapshot) -> RiskLevel {
        Self::classify(snapshot.risk_score_total(), snapshot.has_issues())
    }
}
