//! Access-log line parsing.
//!
//! Parsing is a pure function from one raw line to a [`Hit`]. Nothing here
//! keeps state between lines, and nothing downstream ever sees a line that
//! failed to parse.

mod clf;
mod json;

#[cfg(test)]
mod tests;

use crate::event::Hit;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Common Log Format: `host ident user [ts] "METHOD URI PROTO" STATUS BYTES`
    #[default]
    Clf,
    /// One JSON object per line with `timestamp`, `method`, `uri` and `status`
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Clf => f.write_str("clf"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line does not match the {format} format")]
    NoMatch { format: LogFormat },

    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid status '{value}'")]
    Status { value: String },

    #[error("uri '{uri}' is not an absolute path")]
    Uri { uri: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_line(format: LogFormat, line: &str) -> Result<Hit, ParseError> {
    match format {
        LogFormat::Clf => clf::parse(line),
        LogFormat::Json => json::parse(line),
    }
}

fn check_uri(uri: &str) -> Result<(), ParseError> {
    if uri.starts_with('/') {
        Ok(())
    } else {
        Err(ParseError::Uri {
            uri: uri.to_string(),
        })
    }
}

fn parse_status(value: &str) -> Result<i64, ParseError> {
    value.parse::<i64>().map_err(|_| ParseError::Status {
        value: value.to_string(),
    })
}
