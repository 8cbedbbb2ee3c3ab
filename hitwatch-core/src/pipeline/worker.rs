use crate::event::Hit;
use crate::pipeline::{Aggregator, HANDOFF_CAPACITY, OUTPUT_CAPACITY};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Spawns `aggregator` on its own task.
///
/// Returns the sender that feeds it hits and the receiver for its output. The
/// output channel closes when the task exits.
pub fn spawn_worker<A: Aggregator>(
    aggregator: A,
    shutdown: CancellationToken,
    tasks: &mut JoinSet<()>,
) -> (mpsc::Sender<Arc<Hit>>, mpsc::Receiver<A::Output>) {
    let (hits_tx, hits_rx) = mpsc::channel(HANDOFF_CAPACITY);
    let (out_tx, out_rx) = mpsc::channel(OUTPUT_CAPACITY);

    tasks.spawn(run_worker(aggregator, hits_rx, out_tx, shutdown));

    (hits_tx, out_rx)
}

async fn run_worker<A: Aggregator>(
    mut aggregator: A,
    mut hits: mpsc::Receiver<Arc<Hit>>,
    output: mpsc::Sender<A::Output>,
    shutdown: CancellationToken,
) {
    let period = aggregator.tick_period();
    // first tick one full period from now, not immediately
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::debug!(aggregator = A::NAME, ?period, "aggregator started");

    let mut observed: u64 = 0;
    let reason = loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => break "shutdown",

            _ = ticker.tick() => {
                let Some(out) = aggregator.tick() else {
                    continue;
                };
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break "shutdown",
                    sent = output.send(out) => {
                        if sent.is_err() {
                            break "output closed";
                        }
                    }
                }
            }

            next = hits.recv() => match next {
                Some(hit) => {
                    aggregator.observe(&hit);
                    observed += 1;
                }
                None => break "input closed",
            },
        }
    };

    tracing::debug!(aggregator = A::NAME, observed, reason, "aggregator stopped");
}
