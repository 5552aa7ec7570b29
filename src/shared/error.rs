use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed (or was interrupted cleanly)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config, file I/O, bind failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Non-fatal failures of a sync cycle.
///
/// None of these ever clear the displayed view: the controller keeps its last
/// accepted snapshot and retries on the next tick.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The freshness probe failed (network error or non-success status)
    #[error("Freshness probe failed: {details}")]
    ProbeFailure {
        status: Option<u16>,
        details: String,
    },

    /// The full snapshot fetch failed (network error or non-success status)
    #[error("Snapshot fetch failed: {details}")]
    FetchFailure {
        status: Option<u16>,
        details: String,
    },

    /// A fetched body could not be parsed or validated as a snapshot
    #[error("Malformed snapshot: {details}")]
    MalformedSnapshot { details: String },
}

impl SyncError {
    pub fn probe(status: Option<u16>, details: impl Into<String>) -> Self {
        SyncError::ProbeFailure {
            status,
            details: details.into(),
        }
    }

    pub fn fetch(status: Option<u16>, details: impl Into<String>) -> Self {
        SyncError::FetchFailure {
            status,
            details: details.into(),
        }
    }

    pub fn malformed(details: impl Into<String>) -> Self {
        SyncError::MalformedSnapshot {
            details: details.into(),
        }
    }

    /// Short machine-friendly name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::ProbeFailure { .. } => "ProbeFailure",
            SyncError::FetchFailure { .. } => "FetchFailure",
            SyncError::MalformedSnapshot { .. } => "MalformedSnapshot",
        }
    }
}

/// Fatal setup errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("Snapshot file not found: {path}\n\n💡 Hint: {suggestion}")]
    SnapshotFileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    InvalidConfig { message: String, hint: String },

    #[error("Failed to bind producer endpoint on {addr}\nDetails: {details}\n\n💡 Hint: Choose a free port with --addr")]
    BindError { addr: String, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_sync_error_kinds() {
        assert_eq!(SyncError::probe(Some(500), "boom").kind(), "ProbeFailure");
        assert_eq!(SyncError::fetch(None, "reset").kind(), "FetchFailure");
        assert_eq!(
            SyncError::malformed("missing field `nodes`").kind(),
            "MalformedSnapshot"
        );
    }

    #[test]
    fn test_sync_error_display() {
        let error = SyncError::malformed("missing field `nodes`");
        assert_eq!(
            error.to_string(),
            "Malformed snapshot: missing field `nodes`"
        );

        let error = SyncError::probe(Some(503), "status 503 Service Unavailable");
        assert!(error.to_string().starts_with("Freshness probe failed"));
    }

    #[test]
    fn test_snapshot_file_not_found_display() {
        let error = DashError::SnapshotFileNotFound {
            path: PathBuf::from(".preflight/scan.json"),
            suggestion: "Run a scan first".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Snapshot file not found"));
        assert!(display.contains(".preflight/scan.json"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Run a scan first"));
    }

    #[test]
    fn test_invalid_config_display() {
        let error = DashError::InvalidConfig {
            message: "poll_interval_ms must be greater than 0".to_string(),
            hint: "Remove the key to use the default".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid configuration"));
        assert!(display.contains("poll_interval_ms"));
    }

    #[test]
    fn test_bind_error_display() {
        let error = DashError::BindError {
            addr: "127.0.0.1:8787".to_string(),
            details: "Address already in use".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("127.0.0.1:8787"));
        assert!(display.contains("Address already in use"));
    }
}
