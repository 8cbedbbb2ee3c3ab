use crate::alarm::{Alert, AlertKind};
use owo_colors::OwoColorize;
use std::collections::VecDeque;

/// Alerts kept on the dashboard, newest first.
pub const ALERT_HISTORY: usize = 20;

pub fn render_alert(alert: &Alert, color: bool) -> String {
    let text = alert.to_string();
    if !color {
        return text;
    }
    match alert.kind {
        AlertKind::HighTraffic => text.red().bold().to_string(),
        AlertKind::Recovered => text.green().to_string(),
    }
}

pub fn render_dashboard(stats: &[String], alerts: &VecDeque<Alert>, color: bool) -> String {
    let mut out = String::new();

    push_heading(&mut out, "Statistics", color);
    if stats.is_empty() {
        out.push_str("  <waiting for first interval>\n");
    }
    for line in stats {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }

    out.push('\n');
    push_heading(&mut out, "Alerts", color);
    if alerts.is_empty() {
        out.push_str("  <none>\n");
    }
    for alert in alerts {
        out.push_str("  ");
        out.push_str(&render_alert(alert, color));
        out.push('\n');
    }

    out
}

fn push_heading(out: &mut String, title: &str, color: bool) {
    let rule = "=".repeat(title.len());
    if color {
        out.push_str(&format!("{}\n{}\n", title.bold(), rule.dimmed()));
    } else {
        out.push_str(&format!("{title}\n{rule}\n"));
    }
}
