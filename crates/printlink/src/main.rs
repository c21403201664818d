mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use printlink_core::Monitor;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Config commands never touch the printer
    if let Command::Config(ref args) = cli.command {
        return commands::config_cmd::handle(args, &cli.global);
    }

    let mut monitor_config = config::build_monitor_config(&cli.global)?;
    if let Command::Watch(ref args) = cli.command {
        if let Some(secs) = args.interval {
            monitor_config.poll_interval = Duration::from_secs(secs.max(1));
        }
    }

    let monitor = Monitor::from_config(&monitor_config)?;
    tracing::debug!(command = ?cli.command, url = %monitor_config.url, "dispatching command");
    commands::dispatch(&cli.command, &monitor, &cli.global).await
}
