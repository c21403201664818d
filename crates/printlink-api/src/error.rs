use thiserror::Error;

/// Top-level error type for the `printlink-api` crate.
///
/// Covers every failure mode of the device API: authentication, transport,
/// HTTP status, and payload decoding. `printlink-core` maps these into
/// domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The device rejected the API key (HTTP 401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// API key contains bytes that are not valid in an HTTP header.
    #[error("Invalid API key header value: {0}")]
    InvalidApiKey(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// The endpoint answered `204 No Content`: the resource is gone.
    #[error("No content at {path}")]
    NoContent { path: String },

    /// Non-success HTTP status with the raw body for debugging.
    #[error("HTTP {status} from {path}")]
    Http {
        status: u16,
        path: String,
        body: String,
    },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the requested resource does not exist (any more).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NoContent { .. } | Self::Http { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// HTTP status code, if the error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NoContent { .. } => Some(204),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
