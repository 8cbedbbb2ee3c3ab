use crate::cli::MonitorArgs;
use crate::clock::TokioClock;
use crate::pipeline::{Pipeline, spawn_pipeline};
use crate::sink::{ConsoleSink, SinkMode};
use crate::source::{LineSource, run_source};
use clap::Args;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// HTTP access log to monitor, or "-" for stdin
    #[arg(short, long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub monitor: MonitorArgs,

    /// Print plain lines instead of redrawing a dashboard
    #[arg(long)]
    pub plain: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = args.monitor.monitor_config()?;
    let settings = config.resolve()?;
    let format = config.log_format();

    // the file must exist before anything is spawned
    let source = LineSource::open(&args.file).await?;

    let shutdown = CancellationToken::new();
    let Pipeline {
        events,
        stats,
        alerts,
        mut tasks,
    } = spawn_pipeline(&settings, Arc::new(TokioClock), shutdown.clone())?;

    let source_task = tokio::spawn(run_source(source, format, events, shutdown.clone()));
    let signal_task = tokio::spawn(cancel_on_signal(shutdown.clone()));

    let mode = if args.plain || !io::stdout().is_terminal() {
        SinkMode::Plain
    } else {
        SinkMode::Dashboard
    };
    let sink_result = ConsoleSink::stdout(mode).run(stats, alerts).await;

    // the sink returns once both outputs close; make sure nothing is left running
    shutdown.cancel();
    signal_task.abort();

    while let Some(joined) = tasks.join_next().await {
        if let Err(error) = joined {
            tracing::error!(%error, "pipeline task failed");
        }
    }

    let summary = source_task.await??;
    tracing::info!(
        lines = summary.lines,
        hits = summary.hits,
        rejected = summary.rejected,
        "monitor stopped"
    );

    sink_result?;
    Ok(())
}

async fn cancel_on_signal(shutdown: CancellationToken) {
    match shutdown_signal().await {
        Ok(()) => {
            tracing::info!("shutdown signal received");
            shutdown.cancel();
        }
        Err(error) => tracing::warn!(%error, "could not install signal handler"),
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = term.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}
