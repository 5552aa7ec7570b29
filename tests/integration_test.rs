/// Integration tests for the sync engine: controller, view model pipeline
/// and transition scheduler wired together through their ports
mod test_utilities;

use preflight_dash::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use test_utilities::mocks::*;

const T0: &str = "2026-03-01T12:00:00Z";
const T1: &str = "2026-03-01T12:00:05Z";
const T2: &str = "2026-03-01T12:00:10Z";

fn controller(
    source: &MockSnapshotSource,
) -> (
    SyncController<MockSnapshotSource, MockSnapshotSink, MockSyncReporter>,
    MockSnapshotSink,
    MockSyncReporter,
) {
    let sink = MockSnapshotSink::new();
    let reporter = MockSyncReporter::new();
    let controller = SyncController::new(source.clone(), sink.clone(), reporter.clone());
    (controller, sink, reporter)
}

#[tokio::test]
async fn test_conditional_fetch_uses_stored_change_token() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), Some("\"v1\""));
    let (controller, sink, _) = controller(&source);

    assert!(matches!(
        controller.initial_fetch().await,
        CycleOutcome::Accepted { .. }
    ));
    assert_eq!(controller.last_change_token().as_deref(), Some("\"v1\""));

    // marker moves but content stays: producer answers 304
    source.touch("m2");
    assert_eq!(controller.run_cycle().await, CycleOutcome::NotModified);
    assert_eq!(controller.last_known_modified_marker().as_deref(), Some("m2"));

    // the 304 settled m2, so the next tick stops at the probe
    assert_eq!(controller.run_cycle().await, CycleOutcome::Unchanged);

    assert_eq!(
        source.if_none_match_history(),
        vec![None, Some("\"v1\"".to_string())]
    );
    assert_eq!(source.fetch_calls(), 2);
    assert_eq!(sink.count(), 1);
}

#[tokio::test]
async fn test_unchanged_marker_means_no_fetch() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);
    let (controller, _, _) = controller(&source);

    controller.initial_fetch().await;
    for _ in 0..3 {
        assert_eq!(controller.run_cycle().await, CycleOutcome::Unchanged);
    }

    assert_eq!(source.probe_calls(), 4);
    assert_eq!(source.fetch_calls(), 1);
}

#[tokio::test]
async fn test_new_snapshot_is_handed_off_once() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);
    let (controller, sink, reporter) = controller(&source);

    controller.initial_fetch().await;
    source.publish("m2", &snapshot_body("2", T1, "fp-2"), None);
    controller.run_cycle().await;
    controller.run_cycle().await;

    assert_eq!(sink.versions(), vec!["1", "2"]);
    assert_eq!(controller.last_accepted().unwrap().version(), "2");
    assert_eq!(
        source.if_none_match_history(),
        vec![None, Some("fp-1".to_string())]
    );
    assert!(reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("Snapshot v2")));
}

#[tokio::test]
async fn test_malformed_snapshot_keeps_previous_state() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);
    let (controller, sink, reporter) = controller(&source);
    controller.initial_fetch().await;

    source.publish(
        "m2",
        r#"{"edges":[],"issues":[],"risk_score_total":0,"version":"2","timestamp":"t"}"#,
        None,
    );
    let outcome = controller.run_cycle().await;

    assert!(matches!(
        outcome,
        CycleOutcome::Failed(SyncError::MalformedSnapshot { .. })
    ));
    assert_eq!(sink.count(), 1);
    assert_eq!(controller.last_accepted().unwrap().version(), "1");
    assert_eq!(controller.last_known_modified_marker().as_deref(), Some("m1"));
    assert_eq!(reporter.error_kinds(), vec!["MalformedSnapshot"]);

    // the same body is retried on the next cycle since the marker was not stored
    source.publish("m2", &snapshot_body("2", T1, "fp-2"), None);
    assert!(matches!(
        controller.run_cycle().await,
        CycleOutcome::Accepted { .. }
    ));
}

#[tokio::test]
async fn test_probe_and_fetch_failures_are_non_fatal() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);
    let (controller, sink, reporter) = controller(&source);
    controller.initial_fetch().await;

    source.fail_probe(Some(SyncError::probe(Some(500), "boom")));
    controller.run_cycle().await;
    source.fail_probe(None);

    source.publish("m2", &snapshot_body("2", T1, "fp-2"), None);
    source.fail_fetch(Some(SyncError::fetch(None, "timeout")));
    controller.run_cycle().await;
    source.fail_fetch(None);

    assert_eq!(reporter.error_kinds(), vec!["ProbeFailure", "FetchFailure"]);
    assert_eq!(sink.versions(), vec!["1"]);

    assert!(matches!(
        controller.run_cycle().await,
        CycleOutcome::Accepted { .. }
    ));
}

#[tokio::test]
async fn test_overlapping_cycle_is_skipped() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);
    let (controller, sink, _) = controller(&source);
    let controller = Arc::new(controller);
    let gate = source.hold_fetches();

    let first = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.run_cycle().await }
    });
    while source.fetch_calls() == 0 {
        tokio::task::yield_now().await;
    }

    assert!(controller.is_in_flight());
    assert_eq!(controller.run_cycle().await, CycleOutcome::Skipped);
    assert_eq!(controller.initial_fetch().await, CycleOutcome::Skipped);

    gate.add_permits(1);
    assert!(matches!(
        first.await.unwrap(),
        CycleOutcome::Accepted { .. }
    ));
    assert!(!controller.is_in_flight());
    assert_eq!(source.fetch_calls(), 1);
    assert_eq!(sink.count(), 1);
}

#[tokio::test]
async fn test_teardown_discards_outstanding_result() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);
    let (controller, sink, _) = controller(&source);
    let controller = Arc::new(controller);
    let gate = source.hold_fetches();

    let pending = tokio::spawn({
        let controller = Arc::clone(&controller);
        async move { controller.initial_fetch().await }
    });
    while source.fetch_calls() == 0 {
        tokio::task::yield_now().await;
    }

    controller.teardown();
    gate.add_permits(1);

    assert_eq!(pending.await.unwrap(), CycleOutcome::Discarded);
    assert_eq!(sink.count(), 0);
    assert!(controller.last_accepted().is_none());
}

#[tokio::test]
async fn test_rejected_handoff_retries_next_cycle() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);
    let (controller, sink, _) = controller(&source);

    sink.reject_all(true);
    assert_eq!(controller.initial_fetch().await, CycleOutcome::Discarded);

    sink.reject_all(false);
    assert!(matches!(
        controller.run_cycle().await,
        CycleOutcome::Accepted { .. }
    ));
    assert_eq!(sink.versions(), vec!["1"]);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_snapshots_render_only_latest_after_current_transition() {
    let surface = MockRenderSurface::new();
    let (writer, reader) = display_cell();
    let (transitions, _task) =
        TransitionScheduler::spawn(surface.clone(), writer, DEFAULT_TRANSITION_DELAY);
    let sink = PresentSnapshotUseCase::new(transitions.clone());

    let snapshot = |version: &str, ts: &str| {
        let body = snapshot_body(version, ts, version);
        Arc::new(SnapshotParser::parse(body.as_bytes(), None).unwrap())
    };

    sink.accept(snapshot("g1", T0)).unwrap();
    while transitions.phase() != TransitionPhase::FadingOut {
        tokio::task::yield_now().await;
    }
    sink.accept(snapshot("g2", T1)).unwrap();
    sink.accept(snapshot("g3", T2)).unwrap();

    tokio::time::sleep(Duration::from_millis(351)).await;
    assert_eq!(reader.current().unwrap().snapshot.version(), "g1");

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(reader.current().unwrap().snapshot.version(), "g3");
    assert_eq!(transitions.completed_transitions(), 2);
    assert_eq!(transitions.superseded_frames(), 1);
    assert_eq!(
        surface.css_classes(),
        vec!["fade-out", "fade-in", "fade-out", "fade-in"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_live_pipeline_follows_producer() {
    let source = MockSnapshotSource::new();
    source.publish("m1", &snapshot_body("1", T0, "fp-1"), None);

    let surface = MockRenderSurface::new();
    let (writer, reader) = display_cell();
    let (transitions, scheduler) =
        TransitionScheduler::spawn(surface.clone(), writer, DEFAULT_TRANSITION_DELAY);
    let reporter = MockSyncReporter::new();
    let controller = Arc::new(
        SyncController::new(
            source.clone(),
            PresentSnapshotUseCase::new(transitions.clone()),
            reporter.clone(),
        )
        .with_poll_interval(Duration::from_millis(2000)),
    );

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let driver = tokio::spawn(Arc::clone(&controller).run(async move {
        let _ = stop_rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let frame = reader.current().unwrap();
    assert_eq!(frame.snapshot.version(), "1");
    assert!(frame.view.summary.ready);

    source.publish("m2", &snapshot_body("2", T1, "fp-2"), None);
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(reader.current().unwrap().snapshot.version(), "2");

    // quiet period: probes only
    tokio::time::sleep(Duration::from_millis(6000)).await;
    assert_eq!(source.fetch_calls(), 2);
    assert!(source.probe_calls() >= 4);

    stop_tx.send(()).unwrap();
    driver.await.unwrap();
    assert!(controller.is_torn_down());

    transitions.shutdown();
    scheduler.await.unwrap();
    assert!(reader.current().is_none());
    assert!(reporter.errors.lock().unwrap().is_empty());
}
