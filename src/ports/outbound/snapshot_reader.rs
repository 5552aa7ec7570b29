use crate::shared::Result;
use std::path::Path;

/// SnapshotReader port for loading a snapshot document from storage
pub trait SnapshotReader {
    /// Reads the raw snapshot bytes at `path`
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, a symbolic link,
    /// or larger than the allowed snapshot size
    fn read_snapshot(&self, path: &Path) -> Result<Vec<u8>>;
}
