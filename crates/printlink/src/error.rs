//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a per-class exit code.

use miette::Diagnostic;
use thiserror::Error;

use printlink_config::ConfigError;
use printlink_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to printer at {url}")]
    #[diagnostic(
        code(printlink::connection_failed),
        help(
            "Check that the printer is powered on and reachable.\n\
             Cause: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(printlink::timeout),
        help("Increase the timeout with --timeout or check the printer's network.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(printlink::auth_failed),
        help(
            "Check the API key shown in the printer's settings.\n\
             Pass it with --api-key, PRINTLINK_API_KEY, or api_key in the profile."
        )
    )]
    AuthFailed { message: String },

    // ── Printer responses ────────────────────────────────────────────
    #[error("Printer endpoint not found: {path}")]
    #[diagnostic(
        code(printlink::not_found),
        help("The printer firmware may not support the PrusaLink v1 API.")
    )]
    NotFound { path: String },

    #[error("Printer API error: {message}")]
    #[diagnostic(code(printlink::api_error))]
    Api { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(printlink::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(printlink::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No printer configured")]
    #[diagnostic(
        code(printlink::no_config),
        help(
            "Pass --url (or PRINTLINK_URL), or add a profile to {path}:\n\n\
             [profiles.default]\n\
             url = \"http://192.168.1.50\""
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(printlink::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(printlink::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Config(_) => exit_code::USAGE,
            Self::Api { .. } | Self::Io(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout => Self::Timeout,
            CoreError::NotFound { path } => Self::NotFound { path },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Api { message, .. } | CoreError::InvalidResponse { message } => {
                Self::Api { message }
            }
            other @ (CoreError::DetailFetch { .. } | CoreError::NoRuntime { .. }) => Self::Api {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}
