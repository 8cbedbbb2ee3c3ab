use crate::event::Hit;
use std::time::Duration;

/// A stateful consumer of hits with its own tick cadence.
///
/// `observe` and `tick` are only ever called from the aggregator's own task,
/// one at a time, so implementations need no locking.
pub trait Aggregator: Send + 'static {
    type Output: Send + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    fn tick_period(&self) -> Duration;

    fn observe(&mut self, hit: &Hit);

    /// Called once per tick period. `None` means nothing to emit this time.
    fn tick(&mut self) -> Option<Self::Output>;
}
