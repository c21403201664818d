//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::effective_path(global).display().to_string(), false);
            Ok(())
        }
        ConfigCommand::Show => {
            let cfg = config::load(global)?.redacted();
            let rendered = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
                OutputFormat::JsonCompact => serde_json::to_string(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => cfg.to_toml()?,
            };
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}
