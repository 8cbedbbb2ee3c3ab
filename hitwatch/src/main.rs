use clap::{Parser, Subcommand};
use hitwatch_core::cli::{MonitorArgs, RunArgs, check, run};
use hitwatch_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "hitwatch",
    version,
    about = "hitwatch: live HTTP access log statistics and traffic alerts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tail an access log and report traffic
    Run(RunArgs),

    /// Validate monitor settings and exit
    Check {
        #[command(flatten)]
        monitor: MonitorArgs,

        /// Print errors without styling
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let _guard = init_logging(args.log_file.as_deref())?;
            run(args).await
        }

        Command::Check { monitor, plain } => check(&monitor, plain),
    }
}
