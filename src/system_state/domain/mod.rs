pub mod edge;
pub mod issue;
pub mod node;
pub mod risk_level;
pub mod snapshot;

pub use edge::{Edge, Relation};
pub use issue::{Issue, Severity};
pub use node::{Node, NodeStatus, NodeType};
pub use risk_level::RiskLevel;
pub use snapshot::{RiskContribution, Snapshot};
