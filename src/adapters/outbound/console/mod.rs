/// Console adapters for reporting and drawing to the terminal
mod sync_reporter;
mod terminal_surface;

pub use sync_reporter::StderrSyncReporter;
pub use terminal_surface::TerminalSurface;
