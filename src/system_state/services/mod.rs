mod snapshot_parser;

pub use snapshot_parser::{SnapshotDocument, SnapshotParser};
