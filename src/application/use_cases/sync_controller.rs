use crate::ports::outbound::{FetchOutcome, SnapshotSink, SnapshotSource, SyncReporter};
use crate::shared::error::SyncError;
use crate::system_state::domain::Snapshot;
use crate::system_state::services::SnapshotParser;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

/// Default polling period of the freshness probe
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// What a single sync cycle ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Another cycle was still in flight; nothing was requested
    Skipped,
    /// The probe marker (or the fetched change token) matched the last one
    Unchanged,
    /// The producer answered "not modified" to the conditional fetch
    NotModified,
    /// A new snapshot was validated and handed off
    Accepted { version: String },
    /// The fetched snapshot was captured before the one already displayed
    Stale,
    /// Probe, fetch or validation failed; the previous snapshot stays
    Failed(SyncError),
    /// The controller was torn down while the request was outstanding
    Discarded,
}

#[derive(Debug, Default)]
struct SyncState {
    last_accepted: Option<Arc<Snapshot>>,
    last_change_token: Option<String>,
    last_known_modified_marker: Option<String>,
}

/// Clears the in-flight flag when a cycle ends, on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// SyncController - keeps an eventually-consistent mirror of the producer's
/// current snapshot
///
/// Each cycle probes a cheap freshness endpoint and only issues a full,
/// conditional fetch when the marker moved. At most one cycle is in flight at
/// any time; a cycle started while another is running is skipped, never
/// queued. Every failure is non-fatal: it is reported and the last accepted
/// snapshot stays in place.
///
/// # Type Parameters
/// * `SRC` - SnapshotSource implementation (the producer)
/// * `SINK` - SnapshotSink implementation (view model + transitions)
/// * `R` - SyncReporter implementation
pub struct SyncController<SRC, SINK, R> {
    source: SRC,
    sink: SINK,
    reporter: R,
    poll_interval: Duration,
    state: Mutex<SyncState>,
    in_flight: AtomicBool,
    torn_down: AtomicBool,
}

impl<SRC, SINK, R> SyncController<SRC, SINK, R>
where
    SRC: SnapshotSource,
    SINK: SnapshotSink,
    R: SyncReporter,
{
    pub fn new(source: SRC, sink: SINK, reporter: R) -> Self {
        Self {
            source,
            sink,
            reporter,
            poll_interval: DEFAULT_POLL_INTERVAL,
            state: Mutex::new(SyncState::default()),
            in_flight: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn last_accepted(&self) -> Option<Arc<Snapshot>> {
        self.lock().last_accepted.clone()
    }

    pub fn last_change_token(&self) -> Option<String> {
        self.lock().last_change_token.clone()
    }

    pub fn last_known_modified_marker(&self) -> Option<String> {
        self.lock().last_known_modified_marker.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    /// Stops future cycles. A request already issued may still complete, but
    /// its result is discarded.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::Release);
    }

    /// First-paint fetch: unconditional, independent of the polling timer.
    ///
    /// The probe is attempted first so the accepted snapshot is paired with
    /// a marker; a failing probe does not prevent the fetch.
    pub async fn initial_fetch(&self) -> CycleOutcome {
        if self.is_torn_down() {
            return CycleOutcome::Discarded;
        }
        let Some(_guard) = self.try_begin() else {
            return CycleOutcome::Skipped;
        };

        let marker = match self.source.probe().await {
            Ok(marker) => Some(marker),
            Err(e) => {
                tracing::debug!(error = %e, "initial probe failed, fetching anyway");
                None
            }
        };

        let fetched = self.source.fetch(None).await;
        self.apply_fetch(fetched, marker)
    }

    /// Runs one probe / conditional-fetch cycle
    pub async fn run_cycle(&self) -> CycleOutcome {
        if self.is_torn_down() {
            return CycleOutcome::Discarded;
        }
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("previous cycle still in flight, tick skipped");
            return CycleOutcome::Skipped;
        };

        let marker = match self.source.probe().await {
            Ok(marker) => marker,
            Err(e) => return self.fail(e),
        };
        if self.is_torn_down() {
            return CycleOutcome::Discarded;
        }

        let (known_marker, change_token) = self.tokens();
        if known_marker.as_deref() == Some(marker.as_str()) {
            return CycleOutcome::Unchanged;
        }

        let fetched = self.source.fetch(change_token.as_deref()).await;
        self.apply_fetch(fetched, Some(marker))
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    fn apply_fetch(
        &self,
        fetched: Result<FetchOutcome, SyncError>,
        marker: Option<String>,
    ) -> CycleOutcome {
        if self.is_torn_down() {
            return CycleOutcome::Discarded;
        }

        match fetched {
            Err(e) => self.fail(e),
            Ok(FetchOutcome::NotModified) => {
                let mut state = self.lock();
                // A 304 confirms the held token still describes this marker
                if state.last_change_token.is_some() && marker.is_some() {
                    state.last_known_modified_marker = marker;
                }
                CycleOutcome::NotModified
            }
            Ok(FetchOutcome::Modified { body, etag }) => {
                match SnapshotParser::parse(&body, etag.as_deref()) {
                    Ok(snapshot) => self.accept(snapshot, marker),
                    Err(e) => self.fail(e),
                }
            }
        }
    }

    fn accept(&self, snapshot: Snapshot, marker: Option<String>) -> CycleOutcome {
        {
            let mut state = self.lock();
            if let Some(previous) = state.last_accepted.as_ref() {
                if snapshot.is_older_than(previous) {
                    self.reporter.report(&format!(
                        "⚠️  Ignoring stale snapshot captured at {} (showing {})",
                        snapshot.timestamp(),
                        previous.timestamp()
                    ));
                    return CycleOutcome::Stale;
                }

                let same_token = snapshot.change_token().is_some()
                    && snapshot.change_token() == state.last_change_token.as_deref();
                if same_token {
                    if marker.is_some() {
                        state.last_known_modified_marker = marker;
                    }
                    return CycleOutcome::Unchanged;
                }
            }
        }

        let snapshot = Arc::new(snapshot);
        if let Err(e) = self.sink.accept(Arc::clone(&snapshot)) {
            tracing::warn!(error = %e, "snapshot handoff rejected");
            return CycleOutcome::Discarded;
        }

        let version = snapshot.version().to_string();
        self.reporter.report(&format!(
            "🔄 Snapshot v{} captured at {} accepted ({} nodes, {} issues, risk {})",
            version,
            snapshot.timestamp(),
            snapshot.nodes().len(),
            snapshot.issues().len(),
            snapshot.risk_score_total()
        ));

        let mut state = self.lock();
        state.last_change_token = snapshot.change_token().map(str::to_string);
        if marker.is_some() {
            state.last_known_modified_marker = marker;
        }
        state.last_accepted = Some(snapshot);

        CycleOutcome::Accepted { version }
    }

    fn fail(&self, error: SyncError) -> CycleOutcome {
        tracing::warn!(kind = error.kind(), error = %error, "sync cycle failed");
        self.reporter.report_error(&error);
        CycleOutcome::Failed(error)
    }

    fn tokens(&self) -> (Option<String>, Option<String>) {
        let state = self.lock();
        (
            state.last_known_modified_marker.clone(),
            state.last_change_token.clone(),
        )
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<SRC, SINK, R> SyncController<SRC, SINK, R>
where
    SRC: SnapshotSource + 'static,
    SINK: SnapshotSink + 'static,
    R: SyncReporter + 'static,
{
    /// Drives the controller until `shutdown` resolves.
    ///
    /// The initial fetch and every tick run as separate tasks; ticks that
    /// arrive while a cycle is in flight are skipped by the guard. On
    /// shutdown the ticker stops and the controller is torn down.
    pub async fn run<F>(self: Arc<Self>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let initial = Arc::clone(&self);
        tokio::spawn(async move {
            let outcome = initial.initial_fetch().await;
            tracing::debug!(?outcome, "initial fetch finished");
        });

        let mut ticker =
            tokio::time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let controller = Arc::clone(&self);
                    tokio::spawn(async move {
                        let outcome = controller.run_cycle().await;
                        tracing::debug!(?outcome, "sync cycle finished");
                    });
                }
            }
        }

        self.teardown();
        tracing::debug!("sync controller torn down");
    }
}
