use crate::shared::Result;
use crate::system_state::domain::Snapshot;
use std::sync::Arc;

/// SnapshotSink port receiving validated snapshots from the sync controller
pub trait SnapshotSink: Send + Sync {
    /// Takes ownership of a newly accepted snapshot.
    ///
    /// # Errors
    /// Returns an error when the downstream pipeline can no longer take
    /// snapshots (e.g. it was torn down). The controller then leaves its
    /// change tokens untouched.
    fn accept(&self, snapshot: Arc<Snapshot>) -> Result<()>;
}
