use crate::ports::outbound::SyncReporter;
use crate::shared::error::SyncError;
use owo_colors::OwoColorize;

/// StderrSyncReporter adapter for reporting sync activity to stderr
///
/// Writes to stderr so that rendered output on stdout stays clean.
pub struct StderrSyncReporter {
    quiet: bool,
}

impl StderrSyncReporter {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppresses informational messages; errors are still printed
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Default for StderrSyncReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncReporter for StderrSyncReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_error(&self, error: &SyncError) {
        eprintln!(
            "{} {} {}",
            "⚠️ ".yellow(),
            error.kind().yellow().bold(),
            error.to_string().dimmed()
        );
    }
}
