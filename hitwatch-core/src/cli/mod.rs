mod check;
mod run;

pub use check::check;
pub use run::{RunArgs, run};

use crate::conf::{ConfigError, ConfigFile, MonitorConfig, load_config_file};
use crate::parse::LogFormat;
use clap::Args;
use std::path::PathBuf;

/// Monitor parameters shared by `run` and `check`.
#[derive(Args, Debug, Clone, Default)]
pub struct MonitorArgs {
    /// TOML config file with a [monitor] table; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interval in seconds at which statistics are emitted [default: 10]
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Alarm window in seconds [default: 120]
    #[arg(short, long)]
    pub window: Option<u64>,

    /// Hits within the alarm window that raise an alert [default: 100]
    #[arg(short, long)]
    pub threshold: Option<u64>,

    /// Access log line format [default: clf]
    #[arg(long, value_enum)]
    pub format: Option<LogFormat>,
}

impl MonitorArgs {
    /// Config file values with command line flags layered on top.
    pub fn monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        let file = match &self.config {
            Some(path) => load_config_file(path)?,
            None => ConfigFile::default(),
        };

        Ok(file.monitor.merge(MonitorConfig {
            stats_interval_seconds: self.interval,
            alarm_window_seconds: self.window,
            alarm_threshold: self.threshold,
            format: self.format,
        }))
    }
}
