use super::{ParseError, check_uri, parse_status};
use crate::event::Hit;
use crate::parse::LogFormat;
use chrono::DateTime;
use regex::Regex;
use std::sync::LazyLock;

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

static CLF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[(?P<timestamp>[^\]]+)\] "(?P<method>\S+) (?P<uri>\S+) [^"]+" (?P<status>\d+)"#)
        .expect("CLF pattern is valid")
});

pub(super) fn parse(line: &str) -> Result<Hit, ParseError> {
    let caps = CLF.captures(line).ok_or(ParseError::NoMatch {
        format: LogFormat::Clf,
    })?;

    let raw_ts = &caps["timestamp"];
    let timestamp =
        DateTime::parse_from_str(raw_ts, TIMESTAMP_FORMAT).map_err(|e| ParseError::Timestamp {
            value: raw_ts.to_string(),
            source: e,
        })?;

    let uri = &caps["uri"];
    check_uri(uri)?;

    Ok(Hit::new(
        timestamp,
        &caps["method"],
        uri,
        parse_status(&caps["status"])?,
    ))
}
