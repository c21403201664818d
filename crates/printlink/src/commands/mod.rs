//! Command dispatch: bridges CLI args -> monitor -> output formatting.

pub mod config_cmd;
pub mod status;
pub mod watch;

use printlink_core::Monitor;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a printer-bound command to its handler.
pub async fn dispatch(cmd: &Command, monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(monitor, global).await,
        Command::Watch(args) => watch::handle(monitor, args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
    }
}
