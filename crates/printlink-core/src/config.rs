// ── Runtime monitor configuration ──
//
// Describes *how* to reach one printer. Carries credential data and
// polling cadence, but never touches disk: the CLI (via printlink-config)
// builds a `MonitorConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use printlink_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for monitoring a single printer.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Printer URL (e.g., `http://192.168.1.50`).
    pub url: Url,
    /// API key sent as `X-Api-Key`, if the printer requires one.
    pub api_key: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How often to poll the status endpoint.
    pub poll_interval: Duration,
}

impl MonitorConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            api_key: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_secs(2),
        }
    }

    /// Build the api-level [`TransportConfig`] for this printer.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
            api_key: self.api_key.clone(),
        }
    }
}
