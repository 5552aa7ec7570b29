//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs derived from a Snapshot:
//! the laid-out graph, the risk overlay and the summary panel.

pub mod render_graph;
pub mod risk_overlay;
pub mod view_model;
pub mod view_model_builder;

pub use render_graph::{EdgeStyle, Emphasis, NodeStyle, Position, RenderEdge, RenderGraph, RenderNode};
pub use risk_overlay::RiskOverlay;
pub use view_model::{IssueView, SummaryView, ViewModel};
pub use view_model_builder::ViewModelBuilder;
