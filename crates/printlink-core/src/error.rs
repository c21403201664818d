// ── Core error types ──
//
// User-facing errors from printlink-core. Consumers never see raw HTTP
// status codes or JSON parse failures; the `From<printlink_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

use crate::model::ResourceId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach printer at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Printer request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Unexpected response from printer: {message}")]
    InvalidResponse { message: String },

    #[error("Could not fetch {resource} detail for id {id}")]
    DetailFetch {
        resource: &'static str,
        id: ResourceId,
        #[source]
        source: Box<CoreError>,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("No async runtime available to {operation}")]
    NoRuntime { operation: &'static str },
}

impl CoreError {
    /// Returns `true` when the printer answered that the resource is gone.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::DetailFetch { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<printlink_api::Error> for CoreError {
    fn from(err: printlink_api::Error) -> Self {
        match err {
            printlink_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            printlink_api::Error::InvalidApiKey(reason) => CoreError::Config {
                message: format!("Invalid API key: {reason}"),
            },
            printlink_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            printlink_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            printlink_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            printlink_api::Error::NoContent { path } => CoreError::NotFound { path },
            printlink_api::Error::Http { status: 404, path, .. } => CoreError::NotFound { path },
            printlink_api::Error::Http { status, path, .. } => CoreError::Api {
                message: format!("{path} answered HTTP {status}"),
                status: Some(status),
            },
            printlink_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}
