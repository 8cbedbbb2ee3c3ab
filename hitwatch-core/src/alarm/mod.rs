//! High-traffic alarm.
//!
//! Every hit counts as one unit in a [`SlidingWindowCounter`]. Once a second
//! the window total is compared with the threshold, and an [`Alert`] is raised
//! only when the comparison flips.

mod alert;


pub use alert::{Alert, AlertKind};

use crate::clock::Clock;
use crate::conf::{ALARM_THRESHOLD, ConfigError};
use crate::event::Hit;
use crate::pipeline::Aggregator;
use crate::window::SlidingWindowCounter;
use std::sync::Arc;
use std::time::Duration;

pub const ALARM_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlarmState {
    Normal,
    Alarmed,
}

pub struct AlarmDetector {
    clock: Arc<dyn Clock>,
    counter: SlidingWindowCounter,
    threshold: u64,
    state: AlarmState,
}

impl AlarmDetector {
    pub fn new(
        window_seconds: u64,
        threshold: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            counter: SlidingWindowCounter::new(window_seconds, clock.clone())?,
            clock,
            threshold: ALARM_THRESHOLD.check(threshold)?,
            state: AlarmState::Normal,
        })
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Current window total.
    pub fn hits(&mut self) -> u64 {
        self.counter.sum()
    }

    pub fn observe(&mut self, _hit: &Hit) {
        self.counter.add(1);
    }

    /// Compares the window total with the threshold and returns an alert if
    /// the state changed since the previous evaluation.
    pub fn evaluate(&mut self) -> Option<Alert> {
        let hits = self.counter.sum();

        let kind = match self.state {
            AlarmState::Normal if hits >= self.threshold => {
                self.state = AlarmState::Alarmed;
                AlertKind::HighTraffic
            }
            AlarmState::Alarmed if hits < self.threshold => {
                self.state = AlarmState::Normal;
                AlertKind::Recovered
            }
            _ => return None,
        };

        tracing::info!(?kind, hits, threshold = self.threshold, "alarm state changed");

        Some(Alert {
            kind,
            hits,
            at: self.clock.wall_now(),
        })
    }
}

impl Aggregator for AlarmDetector {
    type Output = Alert;

    const NAME: &'static str = "alarm";

    fn tick_period(&self) -> Duration {
        ALARM_TICK
    }

    fn observe(&mut self, hit: &Hit) {
        AlarmDetector::observe(self, hit);
    }

    fn tick(&mut self) -> Option<Alert> {
        self.evaluate()
    }
}
