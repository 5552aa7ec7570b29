use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum snapshot file size (16 MB).
/// Scan snapshots are small JSON documents; anything larger is rejected.
pub const MAX_SNAPSHOT_SIZE: u64 = 16 * 1024 * 1024;

/// Validates that a snapshot path exists and is a regular file
///
/// # Security
/// Uses `symlink_metadata()` so that a symbolic link is rejected instead of
/// silently followed.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file exceeds `MAX_SNAPSHOT_SIZE`
pub fn validate_snapshot_file(path: &Path) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!("Failed to read metadata for {}: {}", path.display(), e)
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_SNAPSHOT_SIZE)?;
    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
