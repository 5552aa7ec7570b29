use crate::application::read_models::ViewModelBuilder;
use crate::application::transition::{DisplayedFrame, TransitionHandle};
use crate::ports::outbound::SnapshotSink;
use crate::shared::Result;
use crate::system_state::domain::Snapshot;
use std::sync::Arc;

/// PresentSnapshotUseCase - hands accepted snapshots to the display pipeline
///
/// Derives the view model synchronously and queues the resulting frame on
/// the transition scheduler. The displayed frame itself only changes at the
/// scheduler's swap step.
#[derive(Debug, Clone)]
pub struct PresentSnapshotUseCase {
    transitions: TransitionHandle,
}

impl PresentSnapshotUseCase {
    pub fn new(transitions: TransitionHandle) -> Self {
        Self { transitions }
    }
}

impl SnapshotSink for PresentSnapshotUseCase {
    fn accept(&self, snapshot: Arc<Snapshot>) -> Result<()> {
        let view = ViewModelBuilder::build(&snapshot);
        self.transitions
            .submit(Arc::new(DisplayedFrame::new(snapshot, view)))
    }
}
