use async_trait::async_trait;
use preflight_dash::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Minimal valid snapshot document
pub fn snapshot_body(version: &str, timestamp: &str, fingerprint: &str) -> String {
    format!(
        r#"{{"nodes":[{{"id":"os","type":"os","label":"Linux","status":"active"}}],
        "edges":[],"issues":[],"risk_score_total":0,"version":"{}",
        "timestamp":"{}","fingerprint":"{}"}}"#,
        version, timestamp, fingerprint
    )
}

#[derive(Default)]
struct ProducerState {
    marker: String,
    body: String,
    etag: Option<String>,
    probe_error: Option<SyncError>,
    fetch_error: Option<SyncError>,
}

/// Mock producer: serves whatever was last published and honors
/// `If-None-Match` against the published ETag
#[derive(Clone, Default)]
pub struct MockSnapshotSource {
    state: Arc<Mutex<ProducerState>>,
    probe_calls: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
    if_none_match: Arc<Mutex<Vec<Option<String>>>>,
    gate: Arc<Mutex<Option<Arc<Semaphore>>>>,
}

#[allow(dead_code)]
impl MockSnapshotSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new snapshot body under a new freshness marker
    pub fn publish(&self, marker: &str, body: &str, etag: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.marker = marker.to_string();
        state.body = body.to_string();
        state.etag = etag.map(str::to_string);
    }

    /// Moves the freshness marker without changing the content
    pub fn touch(&self, marker: &str) {
        self.state.lock().unwrap().marker = marker.to_string();
    }

    pub fn fail_probe(&self, error: Option<SyncError>) {
        self.state.lock().unwrap().probe_error = error;
    }

    pub fn fail_fetch(&self, error: Option<SyncError>) {
        self.state.lock().unwrap().fetch_error = error;
    }

    /// Makes every fetch wait for a permit on the returned semaphore
    pub fn hold_fetches(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn if_none_match_history(&self) -> Vec<Option<String>> {
        self.if_none_match.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn probe(&self) -> std::result::Result<String, SyncError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        match &state.probe_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.marker.clone()),
        }
    }

    async fn fetch(
        &self,
        if_none_match: Option<&str>,
    ) -> std::result::Result<FetchOutcome, SyncError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.if_none_match
            .lock()
            .unwrap()
            .push(if_none_match.map(str::to_string));

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        let state = self.state.lock().unwrap();
        if let Some(error) = &state.fetch_error {
            return Err(error.clone());
        }
        if if_none_match.is_some() && if_none_match == state.etag.as_deref() {
            return Ok(FetchOutcome::NotModified);
        }
        Ok(FetchOutcome::Modified {
            body: state.body.as_bytes().to_vec(),
            etag: state.etag.clone(),
        })
    }
}
