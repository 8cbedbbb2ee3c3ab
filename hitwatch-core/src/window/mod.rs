//! Per-second sliding window counter.
//!
//! A ring of one-second buckets. Expiry is lazy: every `add` and `sum` first
//! moves the cursor forward by the number of whole seconds elapsed since the
//! last move, zeroing each bucket it passes. There is no background timer, so
//! an idle counter costs nothing and catches up on the next call (at most one
//! full sweep of the ring, however long it sat idle).

#[cfg(test)]
mod tests;

use crate::clock::Clock;
use crate::conf::ConfigError;
use std::sync::Arc;
use std::time::{Duration, Instant};

const STEP: Duration = Duration::from_secs(1);

pub struct SlidingWindowCounter {
    buckets: Vec<u64>,
    cursor: usize,
    last_advance: Instant,
    clock: Arc<dyn Clock>,
}

impl SlidingWindowCounter {
    pub fn new(window_seconds: u64, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let len = usize::try_from(window_seconds).unwrap_or(0);
        if len == 0 {
            return Err(ConfigError::invalid(
                "alarm_window_seconds",
                window_seconds,
                "window must be at least one second",
            ));
        }

        Ok(Self {
            buckets: vec![0; len],
            cursor: 0,
            last_advance: clock.now(),
            clock,
        })
    }

    pub fn window_seconds(&self) -> usize {
        self.buckets.len()
    }

    pub fn add(&mut self, v: u64) {
        self.forward();
        self.buckets[self.cursor] += v;
    }

    /// Total of everything added during the trailing window.
    pub fn sum(&mut self) -> u64 {
        self.forward();
        self.buckets.iter().sum()
    }

    fn forward(&mut self) {
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.last_advance);
        let steps = (elapsed.as_secs() / STEP.as_secs()) as usize;
        if steps == 0 {
            return;
        }

        let len = self.buckets.len();
        let steps = steps.min(len);
        for i in 1..=steps {
            self.buckets[(self.cursor + i) % len] = 0;
        }

        self.cursor = (self.cursor + steps) % len;
        self.last_advance = now;
    }
}
