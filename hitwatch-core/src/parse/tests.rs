use crate::parse::{LogFormat, ParseError, parse_line};
use pretty_assertions::assert_eq;

#[test]
fn parses_common_log_format() {
    let line = r#"127.0.0.1 - james [09/May/2018:16:00:39 +0000] "GET /report HTTP/1.0" 200 123"#;

    let hit = parse_line(LogFormat::Clf, line).unwrap();

    assert_eq!(hit.method(), "GET");
    assert_eq!(hit.uri(), "/report");
    assert_eq!(hit.status(), 200);
    assert_eq!(hit.timestamp().to_rfc3339(), "2018-05-09T16:00:39+00:00");
}

#[test]
fn keeps_timezone_offset() {
    let line = r#"10.0.0.2 - - [01/Jan/2024:23:59:59 -0700] "POST /api/user HTTP/1.1" 503 0"#;

    let hit = parse_line(LogFormat::Clf, line).unwrap();

    assert_eq!(hit.timestamp().to_rfc3339(), "2024-01-01T23:59:59-07:00");
    assert_eq!(hit.status(), 503);
}

#[test]
fn rejects_lines_without_request() {
    let err = parse_line(LogFormat::Clf, "garbage").unwrap_err();
    assert!(matches!(
        err,
        ParseError::NoMatch {
            format: LogFormat::Clf
        }
    ));
}

#[test]
fn rejects_bad_clf_timestamp() {
    let line = r#"127.0.0.1 - - [yesterday] "GET / HTTP/1.0" 200 1"#;
    let err = parse_line(LogFormat::Clf, line).unwrap_err();
    assert!(matches!(err, ParseError::Timestamp { .. }));
}

#[test]
fn rejects_non_path_uri() {
    let line = r#"127.0.0.1 - - [09/May/2018:16:00:39 +0000] "GET http://x/y HTTP/1.0" 200 1"#;
    let err = parse_line(LogFormat::Clf, line).unwrap_err();
    assert!(matches!(err, ParseError::Uri { .. }));
}

#[test]
fn parses_json_with_string_status() {
    let line = r#"{"timestamp":"2025-03-01T12:00:00Z","method":"GET","uri":"/api/widgets","status":"404","level":"INFO"}"#;

    let hit = parse_line(LogFormat::Json, line).unwrap();

    assert_eq!(hit.method(), "GET");
    assert_eq!(hit.uri(), "/api/widgets");
    assert_eq!(hit.status(), 404);
}

#[test]
fn parses_json_with_numeric_status() {
    let line = r#"{"timestamp":"2025-03-01T12:00:00+02:00","method":"PUT","uri":"/","status":201}"#;
    let hit = parse_line(LogFormat::Json, line).unwrap();
    assert_eq!(hit.status(), 201);
}

#[test]
fn json_requires_every_field() {
    let line = r#"{"timestamp":"2025-03-01T12:00:00Z","method":"GET","status":200}"#;
    let err = parse_line(LogFormat::Json, line).unwrap_err();
    assert!(matches!(err, ParseError::MissingField { field: "uri" }));

    let err = parse_line(LogFormat::Json, "not json").unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}
