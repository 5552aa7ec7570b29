use preflight_dash::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock SnapshotSink capturing every handed-off snapshot
#[derive(Clone, Default)]
pub struct MockSnapshotSink {
    pub accepted: Arc<Mutex<Vec<Arc<Snapshot>>>>,
    reject: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockSnapshotSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_all(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    pub fn versions(&self) -> Vec<String> {
        self.accepted
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.version().to_string())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.accepted.lock().unwrap().len()
    }
}

impl SnapshotSink for MockSnapshotSink {
    fn accept(&self, snapshot: Arc<Snapshot>) -> Result<()> {
        if self.reject.load(Ordering::SeqCst) {
            anyhow::bail!("sink closed");
        }
        self.accepted.lock().unwrap().push(snapshot);
        Ok(())
    }
}
