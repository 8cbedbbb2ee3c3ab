use crate::conf::{ConfigError, MonitorConfig, MonitorSettings, load_config_file};
use crate::parse::LogFormat;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn defaults_match_documented_values() {
    let settings = MonitorConfig::default().resolve().unwrap();

    assert_eq!(settings, MonitorSettings::default());
    assert_eq!(settings.stats_interval_seconds(), 10);
    assert_eq!(settings.alarm_window_seconds(), 120);
    assert_eq!(settings.alarm_threshold(), 100);
}

#[test]
fn zero_values_are_rejected() {
    for (interval, window, threshold, label) in [
        (0, 120, 100, "stats_interval_seconds"),
        (10, 0, 100, "alarm_window_seconds"),
        (10, 120, 0, "alarm_threshold"),
    ] {
        let err = MonitorSettings::new(interval, window, threshold).unwrap_err();
        match err {
            ConfigError::InvalidConfiguration { label: got, .. } => assert_eq!(got, label),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn out_of_range_interval_reports_bounds() {
    let err = MonitorSettings::new(3601, 120, 100).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid configuration: stats_interval_seconds = 3601, must be between 1 s and 3600 s"
    );
}

#[test]
fn overrides_win_over_file_values() {
    let file = MonitorConfig {
        stats_interval_seconds: Some(5),
        alarm_window_seconds: Some(60),
        alarm_threshold: None,
        format: Some(LogFormat::Json),
    };
    let cli = MonitorConfig {
        stats_interval_seconds: None,
        alarm_window_seconds: Some(30),
        alarm_threshold: Some(7),
        format: None,
    };

    let merged = file.merge(cli);

    assert_eq!(merged.stats_interval_seconds, Some(5));
    assert_eq!(merged.alarm_window_seconds, Some(30));
    assert_eq!(merged.alarm_threshold, Some(7));
    assert_eq!(merged.log_format(), LogFormat::Json);
}

#[test]
fn loads_monitor_table_from_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[monitor]\nstats_interval_seconds = 2\nalarm_threshold = 50\nformat = \"json\""
    )
    .unwrap();

    let cfg = load_config_file(file.path()).unwrap();
    let settings = cfg.monitor.resolve().unwrap();

    assert_eq!(settings.stats_interval_seconds(), 2);
    assert_eq!(settings.alarm_window_seconds(), 120);
    assert_eq!(settings.alarm_threshold(), 50);
    assert_eq!(cfg.monitor.log_format(), LogFormat::Json);
}

#[test]
fn unknown_keys_are_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[monitor]\nthreshhold = 5").unwrap();

    let err = load_config_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}
