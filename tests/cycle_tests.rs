mod harness;

use std::sync::Arc;
use std::time::Duration;

use rentwatch::application::cycle::UpdateCycle;
use rentwatch::application::dispatch::{DispatchMode, Dispatcher};
use rentwatch::application::health::SourceHealthTracker;
use rentwatch::port::{Alert, ListingSink, ListingSource, SeenStore};
use rentwatch::testkit::alert::RecordingAlerts;
use rentwatch::testkit::domain::{link, listing};
use rentwatch::testkit::sink::{HangingSink, RecordingSink};
use rentwatch::testkit::source::{PanickingSource, ScriptedSource};
use rentwatch::testkit::store::MemorySeenStore;

fn cycle(
    sources: Vec<Arc<dyn ListingSource>>,
    store: Arc<dyn SeenStore>,
    sinks: Vec<Arc<dyn ListingSink>>,
    mode: DispatchMode,
    alerts: &RecordingAlerts,
) -> UpdateCycle {
    UpdateCycle::new(
        sources,
        store,
        Dispatcher::new(sinks, mode),
        SourceHealthTracker::new(Arc::new(alerts.clone())),
    )
}

fn two_sources() -> Vec<Arc<dyn ListingSource>> {
    vec![
        Arc::new(ScriptedSource::new("first").repeat_listings(vec![listing("A"), listing("B")])),
        Arc::new(ScriptedSource::new("second").repeat_listings(vec![listing("C")])),
    ]
}

#[tokio::test]
async fn fresh_store_dispatches_every_listing_in_source_order() {
    let db = harness::temp_db::TempDb::create("fresh");
    let store = db.store();
    let sink = RecordingSink::named("recording");
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        two_sources(),
        Arc::new(db.store()),
        vec![Arc::new(sink.clone())],
        DispatchMode::default(),
        &alerts,
    );

    let report = cycle.run().await;

    assert_eq!(report.new, 3);
    assert_eq!(sink.names(), vec!["A", "B", "C"]);
    assert_eq!(store.count().await.unwrap(), 3);
    for name in ["A", "B", "C"] {
        assert!(store.get(&link(name)).unwrap().is_some());
    }
    assert!(alerts.is_empty());
}

#[tokio::test]
async fn already_recorded_listing_is_skipped() {
    let seeded = link("B");
    let store = MemorySeenStore::with_links([seeded.as_str()]);
    let sink = RecordingSink::named("recording");
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        two_sources(),
        Arc::new(store.clone()),
        vec![Arc::new(sink.clone())],
        DispatchMode::default(),
        &alerts,
    );

    let report = cycle.run().await;

    assert_eq!(sink.names(), vec!["A", "C"]);
    assert_eq!(report.already_seen, 1);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn same_link_is_never_dispatched_twice_across_cycles() {
    let db = harness::temp_db::TempDb::create("repeat");
    let sink = RecordingSink::named("recording");
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        two_sources(),
        Arc::new(db.store()),
        vec![Arc::new(sink.clone())],
        DispatchMode::default(),
        &alerts,
    );

    cycle.run().await;
    let second = cycle.run().await;

    assert_eq!(second.new, 0);
    assert_eq!(second.already_seen, 3);
    assert_eq!(sink.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn hanging_sink_does_not_hold_up_the_cycle() {
    let store = MemorySeenStore::new();
    let hanging = HangingSink::new(Duration::from_secs(10));
    let recording = RecordingSink::named("recording");
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        vec![Arc::new(
            ScriptedSource::new("first").then_listings(vec![listing("A"), listing("B")]),
        )],
        Arc::new(store.clone()),
        vec![Arc::new(hanging.clone()), Arc::new(recording.clone())],
        DispatchMode::Concurrent {
            timeout: Duration::from_secs(5),
        },
        &alerts,
    );

    let started = tokio::time::Instant::now();
    let report = cycle.run().await;
    let elapsed = started.elapsed();

    assert_eq!(report.new, 2);
    assert!(elapsed < Duration::from_secs(20), "cycle waited {elapsed:?}");
    assert!(store.contains(&link("A")));
    assert!(store.contains(&link("B")));
    assert_eq!(recording.names(), vec!["A", "B"]);

    // Timed-out deliveries are abandoned, not left running.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(hanging.completed(), 0);
}

#[tokio::test]
async fn failing_source_sends_one_alert_and_others_still_dispatch() {
    let sink = RecordingSink::named("recording");
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        vec![
            Arc::new(ScriptedSource::new("broken").then_error("connection reset by peer")),
            Arc::new(ScriptedSource::new("second").then_listings(vec![listing("C")])),
        ],
        Arc::new(MemorySeenStore::new()),
        vec![Arc::new(sink.clone())],
        DispatchMode::default(),
        &alerts,
    );

    let report = cycle.run().await;

    assert_eq!(report.failed_sources, vec!["broken"]);
    assert_eq!(sink.names(), vec!["C"]);
    match alerts.alerts().as_slice() {
        [Alert::SourceFailed { source, detail }] => {
            assert_eq!(source, "broken");
            assert!(detail.contains("connection reset by peer"), "detail: {detail}");
        }
        other => panic!("expected one failure alert, got {other:?}"),
    }
}

#[tokio::test]
async fn restored_is_alerted_once_per_recovery() {
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        vec![Arc::new(
            ScriptedSource::new("flaky")
                .then_error("timeout")
                .then_listings(vec![listing("A")])
                .repeat_listings(vec![listing("A"), listing("B")]),
        )],
        Arc::new(MemorySeenStore::new()),
        vec![],
        DispatchMode::default(),
        &alerts,
    );

    for _ in 0..4 {
        cycle.run().await;
    }

    assert_eq!(
        alerts.count(|a| matches!(a, Alert::SourceRestored { .. })),
        1
    );
    assert!(!cycle.health().is_unhealthy("flaky"));
}

#[tokio::test]
async fn empty_streak_alerts_once() {
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        vec![Arc::new(
            ScriptedSource::new("quiet")
                .then_listings(vec![])
                .then_listings(vec![])
                .then_listings(vec![])
                .then_listings(vec![listing("A")])
                .repeat_listings(vec![]),
        )],
        Arc::new(MemorySeenStore::new()),
        vec![],
        DispatchMode::Sequential,
        &alerts,
    );

    for _ in 0..5 {
        cycle.run().await;
    }

    // Three empty cycles, one recovery, then a new streak.
    assert_eq!(alerts.count(|a| matches!(a, Alert::SourceEmpty { .. })), 2);
    assert_eq!(
        alerts.count(|a| matches!(a, Alert::SourceRestored { .. })),
        1
    );
}

#[tokio::test]
async fn panicking_source_does_not_abort_the_cycle() {
    let sink = RecordingSink::named("recording");
    let alerts = RecordingAlerts::new();
    let mut cycle = cycle(
        vec![
            Arc::new(PanickingSource::named("exploding")),
            Arc::new(ScriptedSource::new("fine").then_listings(vec![listing("C")])),
        ],
        Arc::new(MemorySeenStore::new()),
        vec![Arc::new(sink.clone())],
        DispatchMode::default(),
        &alerts,
    );

    let report = tokio::spawn(async move { cycle.run().await })
        .await
        .expect("cycle task completes");

    assert_eq!(report.failed_sources, vec!["exploding"]);
    assert_eq!(sink.names(), vec!["C"]);
    assert_eq!(
        alerts.count(|a| matches!(a, Alert::SourceFailed { source, .. } if source == "exploding")),
        1
    );
    assert_eq!(alerts.len(), 1);
}
