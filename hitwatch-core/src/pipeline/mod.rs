//! Event fan-out and aggregator tasks.
//!
//! ```text
//! events ─► Dispatcher ─┬─► worker(StatsAggregator) ─► StatsReport
//!                       └─► worker(AlarmDetector)   ─► Alert
//! ```
//!
//! Every arrow between tasks is a bounded channel. The dispatcher hands each
//! hit to every worker before it reads the next one, so the slowest aggregator
//! sets the pace and nothing is dropped. A single [`CancellationToken`] is
//! shared by all tasks; cancelling it stops them all.

mod aggregator;
mod dispatcher;
mod worker;


pub use aggregator::Aggregator;
pub use dispatcher::Dispatcher;
pub use worker::spawn_worker;

use crate::alarm::{AlarmDetector, Alert};
use crate::clock::Clock;
use crate::conf::{ConfigError, MonitorSettings};
use crate::event::Hit;
use crate::stats::{StatsAggregator, StatsReport};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Capacity of every hit hand-off between tasks.
pub const HANDOFF_CAPACITY: usize = 1;

/// Capacity of the channels carrying aggregator output to the sink.
pub const OUTPUT_CAPACITY: usize = 16;

/// A running pipeline.
///
/// Dropping `events` is a normal end of input: the dispatcher stops, the
/// workers see their inputs close, and both output channels close after them.
pub struct Pipeline {
    pub events: mpsc::Sender<Hit>,
    pub stats: mpsc::Receiver<StatsReport>,
    pub alerts: mpsc::Receiver<Alert>,
    pub tasks: JoinSet<()>,
}

/// Builds both aggregators and spawns the dispatcher and worker tasks.
///
/// All parameters are checked before anything is spawned. Must be called from
/// inside a tokio runtime.
pub fn spawn_pipeline(
    settings: &MonitorSettings,
    clock: Arc<dyn Clock>,
    shutdown: CancellationToken,
) -> Result<Pipeline, ConfigError> {
    let stats = StatsAggregator::new(settings.stats_interval_seconds())?;
    let alarm = AlarmDetector::new(
        settings.alarm_window_seconds(),
        settings.alarm_threshold(),
        clock,
    )?;

    let mut tasks = JoinSet::new();

    let (stats_in, stats_out) = spawn_worker(stats, shutdown.clone(), &mut tasks);
    let (alarm_in, alarm_out) = spawn_worker(alarm, shutdown.clone(), &mut tasks);

    let mut dispatcher = Dispatcher::new(shutdown);
    dispatcher.register(stats_in);
    dispatcher.register(alarm_in);

    let (events_tx, events_rx) = mpsc::channel(HANDOFF_CAPACITY);
    tasks.spawn(dispatcher.run(events_rx));

    tracing::info!(
        stats_interval_seconds = settings.stats_interval_seconds(),
        alarm_window_seconds = settings.alarm_window_seconds(),
        alarm_threshold = settings.alarm_threshold(),
        "pipeline started"
    );

    Ok(Pipeline {
        events: events_tx,
        stats: stats_out,
        alerts: alarm_out,
        tasks,
    })
}
