use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
        }
    }
}

/// A configuration risk reported by the producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    code: String,
    severity: Severity,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    suggestion: String,
}

impl Issue {
    pub fn new(code: &str, severity: Severity, title: &str) -> Self {
        Self {
            code: code.to_string(),
            severity,
            title: title.to_string(),
            description: String::new(),
            suggestion: String::new(),
        }
    }

    pub fn with_details(mut self, description: &str, suggestion: &str) -> Self {
        self.description = description.to_string();
        self.suggestion = suggestion.to_string();
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}
