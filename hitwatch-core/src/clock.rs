use chrono::{DateTime, Local};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A monotonically non-decreasing time source.
///
/// The sliding window counter reads time only through this trait so tests can
/// move time forward without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Wall-clock time, used to stamp alerts.
    fn wall_now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Reads the tokio runtime clock.
///
/// Outside of tests this is the same as `Instant::now()`. Under a paused
/// runtime it follows `tokio::time::advance`, which keeps counters in step
/// with the tickers that drive them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    wall_base: DateTime<Local>,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    /// A clock whose wall-clock reading starts at `wall`.
    pub fn starting_at(wall: DateTime<Local>) -> Self {
        Self {
            base: Instant::now(),
            wall_base: wall,
            offset: Mutex::new(Duration::ZERO),
        }
    }

    fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Moves the clock to `secs` seconds after its creation.
    ///
    /// Setting a time earlier than the current reading is ignored.
    pub fn set_secs(&self, secs: u64) {
        self.set(Duration::from_secs(secs));
    }

    pub fn set(&self, since_start: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        if since_start > *offset {
            *offset = since_start;
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset()
    }

    fn wall_now(&self) -> DateTime<Local> {
        chrono::Duration::from_std(self.offset())
            .ok()
            .and_then(|offset| self.wall_base.checked_add_signed(offset))
            .unwrap_or(self.wall_base)
    }
}
