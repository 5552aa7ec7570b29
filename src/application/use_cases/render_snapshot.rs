use crate::application::read_models::{ViewModel, ViewModelBuilder};
use crate::ports::outbound::{OutputPresenter, SnapshotReader, SyncReporter};
use crate::shared::Result;
use crate::system_state::services::SnapshotParser;
use anyhow::Context;
use std::path::Path;

/// RenderSnapshotUseCase - one-shot rendering of a snapshot file
///
/// Reads a snapshot document from storage, validates it and presents the
/// derived view model as pretty-printed JSON.
///
/// # Type Parameters
/// * `SR` - SnapshotReader implementation
/// * `OP` - OutputPresenter implementation
/// * `R` - SyncReporter implementation
pub struct RenderSnapshotUseCase<SR, OP, R> {
    reader: SR,
    presenter: OP,
    reporter: R,
}

impl<SR, OP, R> RenderSnapshotUseCase<SR, OP, R>
where
    SR: SnapshotReader,
    OP: OutputPresenter,
    R: SyncReporter,
{
    pub fn new(reader: SR, presenter: OP, reporter: R) -> Self {
        Self {
            reader,
            presenter,
            reporter,
        }
    }

    /// Executes the render use case
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, the snapshot is
    /// malformed, or the presenter fails
    pub fn execute(&self, input: &Path) -> Result<ViewModel> {
        self.reporter
            .report(&format!("📖 Loading snapshot from: {}", input.display()));

        let body = self.reader.read_snapshot(input)?;
        let snapshot = SnapshotParser::parse(&body, None).map_err(|e| {
            self.reporter.report_error(&e);
            e
        })?;

        self.reporter.report(&format!(
            "✅ Snapshot v{} with {} node(s), {} edge(s), {} issue(s)",
            snapshot.version(),
            snapshot.nodes().len(),
            snapshot.edges().len(),
            snapshot.issues().len()
        ));

        let view = ViewModelBuilder::build(&snapshot);
        let json =
            serde_json::to_string_pretty(&view).context("Failed to serialize view model")?;
        self.presenter.present(&json)?;

        Ok(view)
    }
}
