use crate::conf::error::ConfigError;
use crate::conf::validation::{ALARM_THRESHOLD, ALARM_WINDOW_SECS, STATS_INTERVAL_SECS};
use crate::parse::LogFormat;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_STATS_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_ALARM_WINDOW_SECS: u64 = 120;
pub const DEFAULT_ALARM_THRESHOLD: u64 = 100;

/// On-disk configuration, e.g.
///
/// ```toml
/// [monitor]
/// stats_interval_seconds = 10
/// alarm_window_seconds = 120
/// alarm_threshold = 100
/// format = "clf"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// Partially specified monitor parameters.
///
/// Both the config file and the command line produce one of these; unset
/// fields fall back to the defaults when resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    pub stats_interval_seconds: Option<u64>,
    pub alarm_window_seconds: Option<u64>,
    pub alarm_threshold: Option<u64>,
    pub format: Option<LogFormat>,
}

impl MonitorConfig {
    /// Layers `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: MonitorConfig) -> MonitorConfig {
        MonitorConfig {
            stats_interval_seconds: overrides
                .stats_interval_seconds
                .or(self.stats_interval_seconds),
            alarm_window_seconds: overrides.alarm_window_seconds.or(self.alarm_window_seconds),
            alarm_threshold: overrides.alarm_threshold.or(self.alarm_threshold),
            format: overrides.format.or(self.format),
        }
    }

    pub fn resolve(&self) -> Result<MonitorSettings, ConfigError> {
        MonitorSettings::new(
            self.stats_interval_seconds
                .unwrap_or(DEFAULT_STATS_INTERVAL_SECS),
            self.alarm_window_seconds
                .unwrap_or(DEFAULT_ALARM_WINDOW_SECS),
            self.alarm_threshold.unwrap_or(DEFAULT_ALARM_THRESHOLD),
        )
    }

    pub fn log_format(&self) -> LogFormat {
        self.format.unwrap_or_default()
    }
}

/// Validated parameters for the aggregation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    stats_interval_seconds: u64,
    alarm_window_seconds: u64,
    alarm_threshold: u64,
}

impl MonitorSettings {
    pub fn new(
        stats_interval_seconds: u64,
        alarm_window_seconds: u64,
        alarm_threshold: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            stats_interval_seconds: STATS_INTERVAL_SECS.check(stats_interval_seconds)?,
            alarm_window_seconds: ALARM_WINDOW_SECS.check(alarm_window_seconds)?,
            alarm_threshold: ALARM_THRESHOLD.check(alarm_threshold)?,
        })
    }

    pub fn stats_interval_seconds(&self) -> u64 {
        self.stats_interval_seconds
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_seconds)
    }

    pub fn alarm_window_seconds(&self) -> u64 {
        self.alarm_window_seconds
    }

    pub fn alarm_threshold(&self) -> u64 {
        self.alarm_threshold
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            stats_interval_seconds: DEFAULT_STATS_INTERVAL_SECS,
            alarm_window_seconds: DEFAULT_ALARM_WINDOW_SECS,
            alarm_threshold: DEFAULT_ALARM_THRESHOLD,
        }
    }
}
