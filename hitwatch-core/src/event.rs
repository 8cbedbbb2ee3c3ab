use chrono::{DateTime, FixedOffset};

/// One parsed access-log record.
///
/// Hits are shared read-only between aggregators once dispatched; no
/// aggregator keeps one around after observing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    timestamp: DateTime<FixedOffset>,
    method: String,
    uri: String,
    status: i64,
}

impl Hit {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        method: impl Into<String>,
        uri: impl Into<String>,
        status: i64,
    ) -> Self {
        Self {
            timestamp,
            method: method.into(),
            uri: uri.into(),
            status,
        }
    }

    /// Event time as reported by the source, not the time it was read.
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Raw status code. Not range checked.
    pub fn status(&self) -> i64 {
        self.status
    }
}
