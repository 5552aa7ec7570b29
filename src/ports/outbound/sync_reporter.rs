use crate::shared::error::SyncError;

/// SyncReporter port for reporting sync activity
///
/// Failures are reported, never raised: the sync core always degrades to the
/// last known good state.
pub trait SyncReporter: Send + Sync {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports a non-fatal sync failure
    fn report_error(&self, error: &SyncError);
}
