/// Counts for one stats interval.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// Sorted ascending by hit count, then by section name.
    pub sections: Vec<(String, u64)>,
    /// Counts for 1xx through 5xx.
    pub status_classes: [u64; 5],
    pub other: u64,
    pub total: u64,
    pub interval_seconds: u64,
}

impl StatsReport {
    /// Average hits per second over the interval.
    pub fn rate(&self) -> f64 {
        self.total as f64 / self.interval_seconds as f64
    }

    /// Human readable lines: sections, status classes, other, then the total.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.sections.len() + 7);

        for (section, count) in &self.sections {
            out.push(format!("'{section}' section: {count} hits"));
        }

        for (i, count) in self.status_classes.iter().enumerate() {
            out.push(format!("'{}xx': {count} hits", i + 1));
        }

        out.push(format!("'other': {} hits", self.other));
        out.push(format!(
            "total: {} hits ({:.2}/sec)",
            self.total,
            self.rate()
        ));

        out
    }
}
