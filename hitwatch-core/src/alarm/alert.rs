use chrono::{DateTime, Local, SecondsFormat};
use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlertKind {
    /// Window total reached the threshold.
    HighTraffic,
    /// Window total dropped back under the threshold.
    Recovered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub hits: u64,
    pub at: DateTime<Local>,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.at.to_rfc3339_opts(SecondsFormat::Secs, false);
        match self.kind {
            AlertKind::HighTraffic => write!(
                f,
                "High traffic generated an alert - hits = {}, triggered at {at}",
                self.hits
            ),
            AlertKind::Recovered => write!(
                f,
                "Traffic went back to normal - hits = {}, triggered at {at}",
                self.hits
            ),
        }
    }
}
