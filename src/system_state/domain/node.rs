use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of resource detected by a scan
///
/// Unrecognized values deserialize to `Other` so that a newer producer never
/// makes a snapshot unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Os,
    Service,
    Runtime,
    Application,
    Port,
    File,
    Python,
    Nodejs,
    Postgres,
    Mysql,
    Redis,
    Gpu,
    DockerImages,
    #[serde(other)]
    Other,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Os => "os",
            NodeType::Service => "service",
            NodeType::Runtime => "runtime",
            NodeType::Application => "application",
            NodeType::Port => "port",
            NodeType::File => "file",
            NodeType::Python => "python",
            NodeType::Nodejs => "nodejs",
            NodeType::Postgres => "postgres",
            NodeType::Mysql => "mysql",
            NodeType::Redis => "redis",
            NodeType::Gpu => "gpu",
            NodeType::DockerImages => "dockerimages",
            NodeType::Other => "other",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Active,
    Inactive,
    Conflict,
}

/// A detected resource (OS, service, runtime, port, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    #[serde(rename = "type")]
    node_type: NodeType,
    label: String,
    status: NodeStatus,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(id: &str, node_type: NodeType, label: &str, status: NodeStatus) -> Self {
        Self {
            id: id.to_string(),
            node_type,
            label: label.to_string(),
            status,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    pub fn is_conflict(&self) -> bool {
        self.status == NodeStatus::Conflict
    }
}
