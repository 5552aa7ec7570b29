use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    Requires,
    Binds,
    Conflicts,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Requires => "REQUIRES",
            Relation::Binds => "BINDS",
            Relation::Conflicts => "CONFLICTS",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed relationship between two nodes. Cycles are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    from: String,
    to: String,
    relation: Relation,
}

impl Edge {
    pub fn new(from: &str, to: &str, relation: Relation) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            relation,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Identifier used by the renderer: `{from}-{to}-{RELATION}`
    pub fn render_id(&self) -> String {
        format!("{}-{}-{}", self.from, self.to, self.relation)
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}
