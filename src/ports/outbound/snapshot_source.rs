use crate::shared::error::SyncError;
use async_trait::async_trait;

/// Result of a (possibly conditional) full snapshot fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The producer reported that the token sent is still current
    NotModified,
    /// A fresh body, with the validation token the producer attached to it
    Modified { body: Vec<u8>, etag: Option<String> },
}

/// SnapshotSource port for talking to the snapshot producer
///
/// Implementations must be `Send + Sync`: cycles run as spawned tasks.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Cheap freshness probe returning the producer's modification marker
    ///
    /// # Errors
    /// `SyncError::ProbeFailure` on network errors or non-success status
    async fn probe(&self) -> Result<String, SyncError>;

    /// Full snapshot fetch
    ///
    /// # Arguments
    /// * `if_none_match` - change token of the last accepted snapshot; when
    ///   present the producer may answer `NotModified`
    ///
    /// # Errors
    /// `SyncError::FetchFailure` on network errors or non-success status
    async fn fetch(&self, if_none_match: Option<&str>) -> Result<FetchOutcome, SyncError>;
}
