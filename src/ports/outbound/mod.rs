/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (producer, renderer, console, files).
pub mod output_presenter;
pub mod render_surface;
pub mod snapshot_reader;
pub mod snapshot_sink;
pub mod snapshot_source;
pub mod sync_reporter;

pub use output_presenter::OutputPresenter;
pub use render_surface::{RenderSurface, VisualClass};
pub use snapshot_reader::SnapshotReader;
pub use snapshot_sink::SnapshotSink;
pub use snapshot_source::{FetchOutcome, SnapshotSource};
pub use sync_reporter::SyncReporter;
