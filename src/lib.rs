//! preflight-dash - live dashboard sync engine for Preflight system scans
//!
//! Keeps a local view of a producer's scan snapshot eventually consistent
//! with the producer, derives a laid-out graph with a risk overlay from it,
//! and sequences visible updates through a fade-out / swap / fade-in cycle.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`system_state`): Snapshot model, layering and risk policies
//! - **Application Layer** (`application`): Sync controller, view model builder, transitions
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP client and server, filesystem, terminal
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use preflight_dash::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let (writer, reader) = display_cell();
//! let (transitions, _task) = TransitionScheduler::spawn(
//!     TerminalSurface::new(reader),
//!     writer,
//!     DEFAULT_TRANSITION_DELAY,
//! );
//!
//! let controller = Arc::new(SyncController::new(
//!     HttpSnapshotSource::new("http://127.0.0.1:8787")?,
//!     PresentSnapshotUseCase::new(transitions.clone()),
//!     StderrSyncReporter::new(),
//! ));
//!
//! controller.run(tokio::time::sleep(Duration::from_secs(60))).await;
//! transitions.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;
pub mod system_state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::{router, serve, serve_on};
    pub use crate::adapters::outbound::console::{StderrSyncReporter, TerminalSurface};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::HttpSnapshotSource;
    pub use crate::application::read_models::{
        Emphasis, RenderGraph, RiskOverlay, SummaryView, ViewModel, ViewModelBuilder,
    };
    pub use crate::application::transition::{
        display_cell, DisplayReader, DisplayWriter, DisplayedFrame, TransitionHandle,
        TransitionPhase, TransitionScheduler, DEFAULT_TRANSITION_DELAY,
    };
    pub use crate::application::use_cases::{
        CycleOutcome, PresentSnapshotUseCase, RenderSnapshotUseCase, SyncController,
        DEFAULT_POLL_INTERVAL,
    };
    pub use crate::ports::outbound::{
        FetchOutcome, OutputPresenter, RenderSurface, SnapshotReader, SnapshotSink,
        SnapshotSource, SyncReporter, VisualClass,
    };
    pub use crate::shared::error::{DashError, SyncError};
    pub use crate::shared::Result;
    pub use crate::system_state::domain::{
        Edge, Issue, Node, NodeStatus, NodeType, Relation, RiskLevel, Severity, Snapshot,
    };
    pub use crate::system_state::policies::{LayerRanking, RiskThresholds};
    pub use crate::system_state::services::{SnapshotDocument, SnapshotParser};
}
