//! Periodic traffic rollup.
//!
//! Counts hits per URL section and per status class between two ticks, then
//! hands the counts out as a [`StatsReport`] and starts over from zero.

mod report;


pub use report::StatsReport;

use crate::conf::{ConfigError, STATS_INTERVAL_SECS};
use crate::event::Hit;
use crate::pipeline::Aggregator;
use std::collections::HashMap;
use std::time::Duration;

/// Section key for URIs that have no enclosed first segment.
pub const ROOT_SECTION: &str = "/";

/// Slot 0 collects every status outside 1xx..=5xx.
const OTHER_SLOT: usize = 0;
const STATUS_SLOTS: usize = 6;

pub struct StatsAggregator {
    interval_seconds: u64,
    total_hits: u64,
    status_hits: [u64; STATUS_SLOTS],
    section_hits: HashMap<String, u64>,
}

impl StatsAggregator {
    pub fn new(interval_seconds: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            interval_seconds: STATS_INTERVAL_SECS.check(interval_seconds)?,
            total_hits: 0,
            status_hits: [0; STATUS_SLOTS],
            section_hits: HashMap::new(),
        })
    }

    pub fn observe(&mut self, hit: &Hit) {
        let section = section_of(hit.uri());
        match self.section_hits.get_mut(section) {
            Some(count) => *count += 1,
            None => {
                self.section_hits.insert(section.to_string(), 1);
            }
        }

        self.status_hits[status_slot(hit.status())] += 1;
        self.total_hits += 1;
    }

    /// Hits observed since the last tick.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Takes the current counts and resets everything to zero.
    pub fn tick(&mut self) -> StatsReport {
        let mut sections: Vec<(String, u64)> = self.section_hits.drain().collect();
        sections.sort_by(|(a_name, a_count), (b_name, b_count)| {
            a_count.cmp(b_count).then_with(|| a_name.cmp(b_name))
        });

        let slots = std::mem::take(&mut self.status_hits);
        let mut status_classes = [0; 5];
        status_classes.copy_from_slice(&slots[1..]);

        StatsReport {
            sections,
            status_classes,
            other: slots[OTHER_SLOT],
            total: std::mem::take(&mut self.total_hits),
            interval_seconds: self.interval_seconds,
        }
    }
}

impl Aggregator for StatsAggregator {
    type Output = StatsReport;

    const NAME: &'static str = "stats";

    fn tick_period(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    fn observe(&mut self, hit: &Hit) {
        StatsAggregator::observe(self, hit);
    }

    fn tick(&mut self) -> Option<StatsReport> {
        Some(StatsAggregator::tick(self))
    }
}

/// First path segment of `uri`: the text between the first two slashes.
///
/// `/api/widgets` gives `api`. Anything without a non-empty segment closed by
/// a second slash (`/`, `/api`, `//x`) falls into [`ROOT_SECTION`].
pub fn section_of(uri: &str) -> &str {
    uri.strip_prefix('/')
        .and_then(|rest| rest.split_once('/'))
        .map(|(section, _)| section)
        .filter(|section| !section.is_empty())
        .unwrap_or(ROOT_SECTION)
}

fn status_slot(status: i64) -> usize {
    // integer division truncates towards zero, so -404 lands in class -4
    match status / 100 {
        class @ 1..=5 => class as usize,
        _ => OTHER_SLOT,
    }
}
