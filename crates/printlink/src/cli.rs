//! Clap derive structures for the `printlink` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// printlink -- watch PrusaLink-compatible printers from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "printlink",
    version,
    about = "Monitor 3D printers from the command line",
    long_about = "Polls a PrusaLink-compatible printer and shows its state, \
        telemetry, current job and transfer, and storage.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Printer profile to use
    #[arg(long, short = 'p', env = "PRINTLINK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Printer URL (overrides profile)
    #[arg(long, short = 'u', env = "PRINTLINK_URL", global = true)]
    pub url: Option<String>,

    /// API key sent as X-Api-Key
    #[arg(long, env = "PRINTLINK_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "PRINTLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PRINTLINK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PRINTLINK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PRINTLINK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// The window title only (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll once and show the printer's current state
    #[command(alias = "st")]
    Status,

    /// Keep polling and print a line whenever the state changes
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in seconds (overrides profile)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,

    /// Exit after this many printed updates
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Print the effective configuration (API keys masked)
    Show,
}
