/// Mock implementations for testing
mod mock_render_surface;
mod mock_snapshot_sink;
mod mock_snapshot_source;
mod mock_sync_reporter;

#[allow(unused_imports)]
pub use mock_render_surface::MockRenderSurface;
#[allow(unused_imports)]
pub use mock_snapshot_sink::MockSnapshotSink;
#[allow(unused_imports)]
pub use mock_snapshot_source::{snapshot_body, MockSnapshotSource};
#[allow(unused_imports)]
pub use mock_sync_reporter::MockSyncReporter;
