use crate::shared::error::SyncError;
use crate::system_state::domain::{Edge, Issue, Node, RiskContribution, Snapshot};
use serde::{Deserialize, Serialize};

/// Wire representation of a snapshot as served by the producer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub issues: Vec<Issue>,
    pub risk_score_total: i64,
    #[serde(default, alias = "risk_breakdown")]
    pub risk_issue_breakdown: Vec<(String, u32)>,
    pub version: String,
    pub timestamp: String,
    #[serde(default)]
    pub fingerprint: String,
}

impl From<&Snapshot> for SnapshotDocument {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            nodes: snapshot.nodes().to_vec(),
            edges: snapshot.edges().to_vec(),
            issues: snapshot.issues().to_vec(),
            risk_score_total: i64::from(snapshot.risk_score_total()),
            risk_issue_breakdown: snapshot
                .risk_breakdown()
                .iter()
                .map(|c| (c.code.clone(), c.value))
                .collect(),
            version: snapshot.version().to_string(),
            timestamp: snapshot.timestamp().to_string(),
            fingerprint: snapshot.change_token().unwrap_or_default().to_string(),
        }
    }
}

/// SnapshotParser service turning a fetched body into a validated Snapshot
///
/// Any failure (invalid JSON, missing required field, broken invariant) is a
/// `SyncError::MalformedSnapshot`; the caller keeps its previous state.
pub struct SnapshotParser;

impl SnapshotParser {
    /// Parses a response body.
    ///
    /// `etag` is the validation token sent alongside the body; when absent the
    /// document's `fingerprint` serves as change token instead.
    pub fn parse(body: &[u8], etag: Option<&str>) -> Result<Snapshot, SyncError> {
        let document: SnapshotDocument = serde_json::from_slice(body)
            .map_err(|e| SyncError::malformed(e.to_string()))?;
        Self::from_document(document, etag)
    }

    pub fn from_document(
        document: SnapshotDocument,
        etag: Option<&str>,
    ) -> Result<Snapshot, SyncError> {
        let change_token = etag
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .or(Some(document.fingerprint));

        let breakdown = document
            .risk_issue_breakdown
            .into_iter()
            .map(|(code, value)| RiskContribution { code, value })
            .collect();

        Ok(Snapshot::new(
            document.nodes,
            document.edges,
            document.issues,
            document.risk_score_total,
            document.version,
            document.timestamp,
        )?
        .with_risk_breakdown(breakdown)
        .with_change_token(change_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system_state::domain::{NodeType, Relation};

    const VALID: &str = r#"{
        "nodes": [
            {"id": "os", "type": "os", "label": "Ubuntu", "status": "active"},
            {"id": "db1", "type": "mysql", "label": "MySQL", "status": "conflict"},
            {"id": "svc1", "type": "service", "label": "api", "status": "active"}
        ],
        "edges": [{"from": "db1", "to": "svc1", "relation": "CONFLICTS"}],
        "issues": [{"code": "PORT_3306", "severity": "critical", "title": "Port clash",
                    "description": "d", "suggestion": "s"}],
        "risk_score_total": 85,
        "risk_issue_breakdown": [["PORT_3306", 85]],
        "version": "1.0.0",
        "timestamp": "2026-03-01T12:00:00Z",
        "fingerprint": "abc123"
    }"#;

    #[test]
    fn test_parse_valid_document() {
        let snapshot = SnapshotParser::parse(VALID.as_bytes(), None).unwrap();

        assert_eq!(snapshot.nodes().len(), 3);
        assert_eq!(snapshot.nodes()[1].node_type(), NodeType::Mysql);
        assert_eq!(snapshot.edges()[0].relation(), Relation::Conflicts);
        assert_eq!(snapshot.risk_score_total(), 85);
        assert_eq!(snapshot.risk_breakdown()[0].code, "PORT_3306");
        assert_eq!(snapshot.risk_breakdown()[0].value, 85);
        assert_eq!(snapshot.change_token(), Some("abc123"));
    }

    #[test]
    fn test_etag_takes_precedence_over_fingerprint() {
        let snapshot = SnapshotParser::parse(VALID.as_bytes(), Some("\"etag-1\"")).unwrap();
        assert_eq!(snapshot.change_token(), Some("\"etag-1\""));
    }

    #[test]
    fn test_missing_nodes_is_malformed() {
        let body = r#"{"edges": [], "issues": [], "risk_score_total": 0,
                       "version": "1", "timestamp": "2026-03-01T12:00:00Z"}"#;
        let err = SnapshotParser::parse(body.as_bytes(), None).unwrap_err();

        assert_eq!(err.kind(), "MalformedSnapshot");
        assert!(err.to_string().contains("nodes"));
    }

    #[test]
    fn test_missing_risk_score_is_malformed() {
        let body = r#"{"nodes": [], "edges": [], "issues": [],
                       "version": "1", "timestamp": "2026-03-01T12:00:00Z"}"#;
        let err = SnapshotParser::parse(body.as_bytes(), None).unwrap_err();
        assert!(err.to_string().contains("risk_score_total"));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = SnapshotParser::parse(b"<html>502 Bad Gateway</html>", None).unwrap_err();
        assert_eq!(err.kind(), "MalformedSnapshot");
    }

    #[test]
    fn test_optional_fields_default() {
        let body = r#"{"nodes": [], "edges": [], "issues": [], "risk_score_total": 0,
                       "version": "1", "timestamp": "2026-03-01T12:00:00Z"}"#;
        let snapshot = SnapshotParser::parse(body.as_bytes(), None).unwrap();

        assert!(snapshot.risk_breakdown().is_empty());
        assert!(snapshot.change_token().is_none());
    }

    #[test]
    fn test_risk_breakdown_alias() {
        let body = r#"{"nodes": [], "edges": [], "issues": [], "risk_score_total": 10,
                       "risk_breakdown": [["A", 4], ["B", 6]],
                       "version": "1", "timestamp": "2026-03-01T12:00:00Z"}"#;
        let snapshot = SnapshotParser::parse(body.as_bytes(), None).unwrap();
        assert_eq!(snapshot.risk_breakdown().len(), 2);
        assert_eq!(snapshot.risk_breakdown()[1].code, "B");
    }

    #[test]
    fn test_document_from_snapshot_preserves_order() {
        let snapshot = SnapshotParser::parse(VALID.as_bytes(), None).unwrap();
        let document = SnapshotDocument::from(&snapshot);
        let json = serde_json::to_vec(&document).unwrap();

        let reparsed = SnapshotParser::parse(&json, None).unwrap();
        assert_eq!(reparsed, snapshot);
    }
}
