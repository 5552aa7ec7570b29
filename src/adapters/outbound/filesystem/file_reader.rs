use crate::ports::outbound::SnapshotReader;
use crate::shared::error::DashError;
use crate::shared::security::validate_snapshot_file;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading snapshot files from the file system
///
/// Symbolic links, non-regular files and oversized files are refused before
/// any byte is read.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotReader for FileSystemReader {
    fn read_snapshot(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(DashError::SnapshotFileNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "Snapshot file \"{}\" does not exist.\n   \
                     Run a scan first, or point --input at an existing scan.json.",
                    path.display()
                ),
            }
            .into());
        }

        validate_snapshot_file(path).map_err(|e| DashError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        fs::read(path).map_err(|e| {
            DashError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
