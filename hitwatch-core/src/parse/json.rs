use super::{ParseError, check_uri, parse_status};
use crate::event::Hit;
use chrono::DateTime;
use serde_json::Value;

pub(super) fn parse(line: &str) -> Result<Hit, ParseError> {
    let event: Value = serde_json::from_str(line)?;

    let raw_ts = required_str(&event, "timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(raw_ts).map_err(|e| ParseError::Timestamp {
        value: raw_ts.to_string(),
        source: e,
    })?;

    let method = required_str(&event, "method")?;
    let uri = required_str(&event, "uri")?;
    check_uri(uri)?;

    // status shows up both as a number and as a string ("200")
    let status = match event.get("status") {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| ParseError::Status {
            value: n.to_string(),
        })?,
        Some(Value::String(s)) => parse_status(s)?,
        Some(other) => {
            return Err(ParseError::Status {
                value: other.to_string(),
            });
        }
        None => return Err(ParseError::MissingField { field: "status" }),
    };

    Ok(Hit::new(timestamp, method, uri, status))
}

fn required_str<'a>(event: &'a Value, field: &'static str) -> Result<&'a str, ParseError> {
    event
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::MissingField { field })
}
