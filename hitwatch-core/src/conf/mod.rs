mod error;
mod loader;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::load_config_file;
pub use types::{
    ConfigFile, DEFAULT_ALARM_THRESHOLD, DEFAULT_ALARM_WINDOW_SECS, DEFAULT_STATS_INTERVAL_SECS,
    MonitorConfig, MonitorSettings,
};
pub use validation::{ALARM_THRESHOLD, ALARM_WINDOW_SECS, RangeConstraint, STATS_INTERVAL_SECS};
