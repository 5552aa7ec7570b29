use crate::application::read_models::{Emphasis, ViewModel};
use crate::application::transition::DisplayReader;
use crate::ports::outbound::{RenderSurface, VisualClass};
use crate::system_state::domain::{RiskLevel, Severity};
use crate::system_state::policies::LayerRanking;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// TerminalSurface adapter drawing the displayed frame as text
///
/// On `fade-in` the frame currently held by the display cell is printed:
/// the summary panel, the graph layer by layer and the issue list.
/// `fade-out` only prints a dim marker line.
pub struct TerminalSurface {
    reader: DisplayReader,
    out: Mutex<Box<dyn Write + Send>>,
    colored: bool,
}

impl TerminalSurface {
    pub fn new(reader: DisplayReader) -> Self {
        Self {
            reader,
            out: Mutex::new(Box::new(io::stdout())),
            colored: true,
        }
    }

    /// Uncolored surface writing into `out`
    pub fn with_writer(reader: DisplayReader, out: Box<dyn Write + Send>) -> Self {
        Self {
            reader,
            out: Mutex::new(out),
            colored: false,
        }
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to draw frame");
        }
    }

    fn paint(&self, text: &str, emphasis: Emphasis) -> String {
        if !self.colored {
            return text.to_string();
        }
        match emphasis {
            Emphasis::Critical => text.red().bold().to_string(),
            Emphasis::Warning => text.yellow().to_string(),
            Emphasis::Conflict => text.bright_red().to_string(),
            Emphasis::None => text.green().to_string(),
        }
    }

    /// Text rendition of a view model
    pub fn render_text(&self, view: &ViewModel) -> String {
        let mut text = String::new();
        let summary = &view.summary;

        let headline = if summary.ready {
            self.paint(summary.headline, Emphasis::None)
        } else {
            self.paint(summary.headline, Emphasis::Critical)
        };
        text.push_str(&format!("\n✈️  {}\n", headline));
        text.push_str(&format!(
            "   snapshot v{} @ {} | risk {} ({}) | {} issue(s)\n",
            summary.version,
            summary.timestamp,
            summary.risk_score_total,
            summary.risk_level,
            summary.issue_count
        ));

        if !summary.breakdown.is_empty() {
            let parts: Vec<String> = summary
                .breakdown
                .iter()
                .map(|entry| format!("{} +{}", entry.code, entry.value))
                .collect();
            text.push_str(&format!("   breakdown: {}\n", parts.join(", ")));
        }

        for layer in 0..LayerRanking::LAYER_COUNT as u8 {
            let ids = view.graph.layer_ids(layer);
            if ids.is_empty() {
                continue;
            }
            text.push_str(&format!("   [{}]\n", LayerRanking::layer_name(layer)));
            for id in ids {
                if let Some(node) = view.graph.node(id) {
                    let marker = if view.overlay.is_node_highlighted(id) {
                        "!"
                    } else {
                        "-"
                    };
                    let level = match node.risk {
                        RiskLevel::None => String::new(),
                        level => format!(" [{}]", level),
                    };
                    text.push_str(&format!(
                        "     {} {}{}\n",
                        marker,
                        self.paint(&node.label, node.style.emphasis),
                        level
                    ));
                }
            }
        }

        for edge in view.graph.edges.iter().filter(|edge| edge.highlighted) {
            text.push_str(&format!(
                "   {} {} -[{}]-> {}\n",
                self.paint("⚡", Emphasis::Conflict),
                edge.source,
                edge.label,
                edge.target
            ));
        }

        for issue in &summary.issues {
            let emphasis = match issue.severity {
                Severity::Critical => Emphasis::Critical,
                Severity::Warning => Emphasis::Warning,
            };
            let tag = self.paint(&format!("[{}]", issue.severity.as_str()), emphasis);
            text.push_str(&format!("   {} {} {}\n", tag, issue.code, issue.title));
            if !issue.suggestion.is_empty() {
                text.push_str(&format!("       → {}\n", issue.suggestion));
            }
        }

        text
    }
}

impl RenderSurface for TerminalSurface {
    fn apply_class(&self, class: VisualClass) {
        match class {
            VisualClass::FadeOut => {
                let marker = format!("   ... {}\n", class.css_class());
                if self.colored {
                    self.write(&marker.dimmed().to_string());
                } else {
                    self.write(&marker);
                }
            }
            VisualClass::FadeIn => {
                if let Some(frame) = self.reader.current() {
                    let text = self.render_text(&frame.view);
                    self.write(&text);
                }
            }
        }
    }
}
