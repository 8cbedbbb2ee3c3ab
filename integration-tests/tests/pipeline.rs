use hitwatch_core::alarm::AlertKind;
use hitwatch_core::clock::TokioClock;
use hitwatch_core::conf::MonitorSettings;
use hitwatch_core::pipeline::{Pipeline, spawn_pipeline};
use integration_tests::harness::{hit, hits};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

fn start(interval: u64, window: u64, threshold: u64) -> (Pipeline, CancellationToken) {
    let shutdown = CancellationToken::new();
    let settings = MonitorSettings::new(interval, window, threshold).unwrap();
    let pipeline = spawn_pipeline(&settings, Arc::new(TokioClock), shutdown.clone()).unwrap();
    (pipeline, shutdown)
}

async fn join_all(tasks: &mut JoinSet<()>) {
    timeout(Duration::from_secs(5), async {
        while let Some(res) = tasks.join_next().await {
            res.unwrap();
        }
    })
    .await
    .expect("pipeline tasks did not stop");
}

#[tokio::test(start_paused = true)]
async fn no_event_is_lost_under_fan_out() {
    const N: usize = 250;
    let (mut pipeline, shutdown) = start(10, 120, N as u64);

    for h in hits(N) {
        pipeline.events.send(h).await.unwrap();
    }

    let report = pipeline.stats.recv().await.unwrap();
    assert_eq!(report.total, N as u64);
    assert_eq!(report.sections.iter().map(|(_, c)| c).sum::<u64>(), N as u64);
    assert_eq!(
        report.status_classes.iter().sum::<u64>() + report.other,
        N as u64
    );

    let alert = pipeline.alerts.recv().await.unwrap();
    assert_eq!(alert.kind, AlertKind::HighTraffic);
    assert_eq!(alert.hits, N as u64);

    shutdown.cancel();
    join_all(&mut pipeline.tasks).await;
}

#[tokio::test(start_paused = true)]
async fn alarm_is_edge_triggered() {
    let (mut pipeline, shutdown) = start(3600, 5, 2);

    pipeline.events.send(hit("/", 200)).await.unwrap();
    assert!(
        timeout(Duration::from_secs(2), pipeline.alerts.recv())
            .await
            .is_err(),
        "one hit is below the threshold"
    );

    pipeline.events.send(hit("/", 200)).await.unwrap();
    let high = timeout(Duration::from_secs(2), pipeline.alerts.recv())
        .await
        .expect("expected a high traffic alert")
        .unwrap();
    assert_eq!(high.kind, AlertKind::HighTraffic);
    assert_eq!(high.hits, 2);
    assert!(high.to_string().contains("High traffic"));

    let normal = timeout(Duration::from_secs(4), pipeline.alerts.recv())
        .await
        .expect("expected a recovery alert")
        .unwrap();
    assert_eq!(normal.kind, AlertKind::Recovered);
    assert!(normal.to_string().contains("back to normal"));

    // sustained quiet: nothing more
    assert!(
        timeout(Duration::from_secs(30), pipeline.alerts.recv())
            .await
            .is_err()
    );

    shutdown.cancel();
    join_all(&mut pipeline.tasks).await;
}

#[tokio::test(start_paused = true)]
async fn end_of_input_stops_everything_without_more_output() {
    let (mut pipeline, _shutdown) = start(10, 120, 1);

    for h in hits(5) {
        pipeline.events.send(h).await.unwrap();
    }
    drop(pipeline.events);

    join_all(&mut pipeline.tasks).await;
    assert!(pipeline.stats.recv().await.is_none());
    assert!(pipeline.alerts.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_outputs() {
    let (mut pipeline, shutdown) = start(1, 120, 1000);

    pipeline.events.send(hit("/api/x", 200)).await.unwrap();
    let report = pipeline.stats.recv().await.unwrap();
    assert_eq!(report.total, 1);

    shutdown.cancel();
    join_all(&mut pipeline.tasks).await;

    assert!(pipeline.stats.recv().await.is_none());
    assert!(pipeline.alerts.recv().await.is_none());
    assert!(pipeline.events.send(hit("/late", 200)).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn stats_reset_between_intervals() {
    let (mut pipeline, shutdown) = start(2, 120, 1000);

    for h in hits(8) {
        pipeline.events.send(h).await.unwrap();
    }
    let first = pipeline.stats.recv().await.unwrap();
    assert_eq!(first.total, 8);

    let second = pipeline.stats.recv().await.unwrap();
    assert_eq!(
        second.lines(),
        vec![
            "'1xx': 0 hits",
            "'2xx': 0 hits",
            "'3xx': 0 hits",
            "'4xx': 0 hits",
            "'5xx': 0 hits",
            "'other': 0 hits",
            "total: 0 hits (0.00/sec)",
        ]
    );

    shutdown.cancel();
    join_all(&mut pipeline.tasks).await;
}
