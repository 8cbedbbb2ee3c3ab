use crate::event::Hit;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Forwards every hit to every registered aggregator, in arrival order.
pub struct Dispatcher {
    targets: Vec<mpsc::Sender<Arc<Hit>>>,
    shutdown: CancellationToken,
}

impl Dispatcher {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            targets: Vec::new(),
            shutdown,
        }
    }

    pub fn register(&mut self, target: mpsc::Sender<Arc<Hit>>) {
        self.targets.push(target);
    }

    /// Runs until `events` closes, the token is cancelled, or every target
    /// has gone away.
    pub async fn run(mut self, mut events: mpsc::Receiver<Hit>) {
        let mut dispatched: u64 = 0;

        let reason = 'dispatch: loop {
            let hit = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break 'dispatch "shutdown",
                next = events.recv() => match next {
                    Some(hit) => Arc::new(hit),
                    None => break 'dispatch "input closed",
                },
            };

            let mut lost_target = false;
            for target in &self.targets {
                tokio::select! {
                    biased;
                    _ = self.shutdown.cancelled() => break 'dispatch "shutdown",
                    sent = target.send(Arc::clone(&hit)) => {
                        if sent.is_err() {
                            lost_target = true;
                        }
                    }
                }
            }
            dispatched += 1;

            if lost_target {
                self.targets.retain(|t| !t.is_closed());
                tracing::warn!(remaining = self.targets.len(), "aggregator stopped accepting hits");
                if self.targets.is_empty() {
                    break "no aggregators left";
                }
            }
        };

        // dropping the senders closes every worker's input
        tracing::debug!(dispatched, reason, "dispatcher stopped");
    }
}
