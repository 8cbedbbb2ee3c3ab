use crate::conf::error::ConfigError;
use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct RangeConstraint<T> {
    pub min: T,
    pub max: T,
    pub label: &'static str,
    pub units: Option<&'static str>,
}

pub const STATS_INTERVAL_SECS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 60 * 60,
    label: "stats_interval_seconds",
    units: Some("s"),
};

pub const ALARM_WINDOW_SECS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 24 * 60 * 60,
    label: "alarm_window_seconds",
    units: Some("s"),
};

pub const ALARM_THRESHOLD: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: u64::MAX / 2,
    label: "alarm_threshold",
    units: Some("hits"),
};

impl<T> RangeConstraint<T>
where
    T: PartialOrd + Copy + Display + Into<u64>,
{
    /// Returns the value unchanged when it lies in `min..=max`.
    pub fn check(&self, value: T) -> Result<T, ConfigError> {
        if value < self.min || value > self.max {
            let units = self.units.map(|u| format!(" {u}")).unwrap_or_default();
            return Err(ConfigError::invalid(
                self.label,
                value.into(),
                format!("must be between {}{units} and {}{units}", self.min, self.max),
            ));
        }
        Ok(value)
    }
}
