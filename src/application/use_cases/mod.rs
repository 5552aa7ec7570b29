/// Use cases module containing application business logic orchestration
mod present_snapshot;
mod render_snapshot;
mod sync_controller;

pub use present_snapshot::PresentSnapshotUseCase;
pub use render_snapshot::RenderSnapshotUseCase;
pub use sync_controller::{CycleOutcome, SyncController, DEFAULT_POLL_INTERVAL};
