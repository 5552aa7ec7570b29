/// Result alias with anyhow::Error as the error type.
/// Plumbing code returns this; the sync core reports `SyncError` values instead.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
