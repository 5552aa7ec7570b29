/// Network adapters for talking to the producer
mod http_snapshot_source;

pub use http_snapshot_source::{
    HttpSnapshotSource, DEFAULT_PROBE_PATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STATE_PATH,
};
