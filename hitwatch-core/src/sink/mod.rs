//! Terminal output for stats reports and alerts.

mod render;


pub use render::{ALERT_HISTORY, render_alert, render_dashboard};

use crate::alarm::Alert;
use crate::stats::StatsReport;
use std::collections::VecDeque;
use std::io::{self, Write};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkMode {
    /// Redraw the whole screen on every update.
    Dashboard,
    /// Append lines, no terminal control codes.
    Plain,
}

pub struct ConsoleSink<W: Write> {
    out: W,
    mode: SinkMode,
    color: bool,
    latest: Vec<String>,
    alerts: VecDeque<Alert>,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(mode: SinkMode) -> Self {
        Self::new(io::stdout(), mode, mode == SinkMode::Dashboard)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, mode: SinkMode, color: bool) -> Self {
        Self {
            out,
            mode,
            color,
            latest: Vec::new(),
            alerts: VecDeque::with_capacity(ALERT_HISTORY),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Renders both streams until both have closed.
    pub async fn run(
        &mut self,
        mut stats: mpsc::Receiver<StatsReport>,
        mut alerts: mpsc::Receiver<Alert>,
    ) -> io::Result<()> {
        let mut stats_open = true;
        let mut alerts_open = true;

        if self.mode == SinkMode::Dashboard {
            // hide cursor while the dashboard runs
            write!(self.out, "\x1b[?25l")?;
            self.redraw()?;
        }

        let result = async {
            while stats_open || alerts_open {
                tokio::select! {
                    report = stats.recv(), if stats_open => match report {
                        Some(report) => self.on_stats(&report)?,
                        None => stats_open = false,
                    },
                    alert = alerts.recv(), if alerts_open => match alert {
                        Some(alert) => self.on_alert(alert)?,
                        None => alerts_open = false,
                    },
                }
            }
            Ok::<_, io::Error>(())
        }
        .await;

        if self.mode == SinkMode::Dashboard {
            write!(self.out, "\x1b[?25h")?;
            self.out.flush()?;
        }

        result
    }

    pub fn on_stats(&mut self, report: &StatsReport) -> io::Result<()> {
        self.latest = report.lines();
        match self.mode {
            SinkMode::Dashboard => self.redraw(),
            SinkMode::Plain => {
                for line in &self.latest {
                    writeln!(self.out, "{line}")?;
                }
                writeln!(self.out)?;
                self.out.flush()
            }
        }
    }

    pub fn on_alert(&mut self, alert: Alert) -> io::Result<()> {
        match self.mode {
            SinkMode::Dashboard => {
                if self.alerts.len() == ALERT_HISTORY {
                    self.alerts.pop_back();
                }
                self.alerts.push_front(alert);
                self.redraw()
            }
            SinkMode::Plain => {
                writeln!(self.out, "{}", render_alert(&alert, self.color))?;
                self.out.flush()
            }
        }
    }

    fn redraw(&mut self) -> io::Result<()> {
        let screen = render_dashboard(&self.latest, &self.alerts, self.color);
        write!(self.out, "\x1b[2J\x1b[H{screen}")?;
        self.out.flush()
    }
}
