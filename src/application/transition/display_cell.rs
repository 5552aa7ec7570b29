use crate::application::read_models::ViewModel;
use crate::system_state::domain::Snapshot;
use std::sync::Arc;
use tokio::sync::watch;

/// The unit the renderer draws: a snapshot and the view model derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedFrame {
    pub snapshot: Arc<Snapshot>,
    pub view: ViewModel,
}

impl DisplayedFrame {
    pub fn new(snapshot: Arc<Snapshot>, view: ViewModel) -> Self {
        Self { snapshot, view }
    }
}

type Slot = Option<Arc<DisplayedFrame>>;

/// Creates the display cell holding the currently rendered frame.
///
/// The writer is unique (not `Clone`); readers are cheap to clone and only
/// ever observe whole frames, never a partially updated one.
pub fn display_cell() -> (DisplayWriter, DisplayReader) {
    let (tx, rx) = watch::channel(None);
    (DisplayWriter { tx }, DisplayReader { rx })
}

/// Single writer of the display cell
#[derive(Debug)]
pub struct DisplayWriter {
    tx: watch::Sender<Slot>,
}

impl DisplayWriter {
    /// Replaces the displayed frame as a whole
    pub fn replace(&self, frame: Arc<DisplayedFrame>) {
        self.tx.send_replace(Some(frame));
    }

    /// Clears the cell on teardown
    pub fn destroy(&self) {
        self.tx.send_replace(None);
    }

    pub fn reader(&self) -> DisplayReader {
        DisplayReader {
            rx: self.tx.subscribe(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayReader {
    rx: watch::Receiver<Slot>,
}

impl DisplayReader {
    pub fn current(&self) -> Option<Arc<DisplayedFrame>> {
        self.rx.borrow().clone()
    }

    /// Waits for the next replace/destroy.
    /// Returns `false` once the writer is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Marks the current value as seen and returns it
    pub fn current_and_mark_seen(&mut self) -> Option<Arc<DisplayedFrame>> {
        self.rx.borrow_and_update().clone()
    }
}
