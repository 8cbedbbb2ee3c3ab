use crate::cli::MonitorArgs;
use crate::conf::ConfigError;
use owo_colors::OwoColorize;

pub fn check(args: &MonitorArgs, plain: bool) -> anyhow::Result<()> {
    let resolved = args
        .monitor_config()
        .and_then(|cfg| cfg.resolve().map(|settings| (cfg, settings)));

    match resolved {
        Ok((cfg, settings)) => {
            println!("✔ Config is valid");
            println!("✔ stats every {}s", settings.stats_interval_seconds());
            println!(
                "✔ alert at {} hits within {}s",
                settings.alarm_threshold(),
                settings.alarm_window_seconds()
            );
            println!("✔ {} log format", cfg.log_format());
            Ok(())
        }
        Err(err) => {
            print_config_error(&err, plain);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError, plain: bool) {
    if plain {
        eprintln!("{err}");
    } else {
        eprintln!("{} {err}", "✘".red().bold());
    }
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidConfiguration { .. } => Some(
            "Intervals, windows and thresholds must all be at least 1.\n\
             \n\
             Example:\n\
             \n\
             [monitor]\n\
             stats_interval_seconds = 10\n\
             alarm_window_seconds   = 120\n\
             alarm_threshold        = 100",
        ),
        ConfigError::Parse { .. } => {
            Some("Only a [monitor] table is recognised; check for misspelled keys.")
        }
        ConfigError::ReadFile { .. } => None,
    }
}
