// Printer HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, status-code mapping, and
// body-preserving JSON decoding. One method per endpoint; the core crate
// decides when each endpoint is polled.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{InfoResponse, JobResponse, StatusResponse, TransferResponse};
use crate::transport::TransportConfig;

/// Endpoint paths, relative to the printer base URL.
pub mod paths {
    pub const STATUS: &str = "api/v1/status";
    pub const INFO: &str = "api/v1/info";
    pub const JOB: &str = "api/v1/job";
    pub const TRANSFER: &str = "api/v1/transfer";
}

/// Async client for a single printer.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted,
/// so detail fetches can carry their own handle into spawned tasks.
#[derive(Debug, Clone)]
pub struct PrinterClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PrinterClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the printer root, e.g. `http://192.168.1.50`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, mut base_url: Url) -> Self {
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    /// The printer base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/v1/status`
    pub async fn status(&self) -> Result<StatusResponse, Error> {
        self.get(paths::STATUS).await
    }

    /// `GET /api/v1/info`
    pub async fn info(&self) -> Result<InfoResponse, Error> {
        self.get(paths::INFO).await
    }

    /// `GET /api/v1/job`
    ///
    /// Returns [`Error::NoContent`] when no job is active.
    pub async fn job(&self) -> Result<JobResponse, Error> {
        self.get(paths::JOB).await
    }

    /// `GET /api/v1/transfer`
    ///
    /// Returns [`Error::NoContent`] when no transfer is running.
    pub async fn transfer(&self) -> Result<TransferResponse, Error> {
        self.get(paths::TRANSFER).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(path, resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Authentication {
                message: format!("{path} answered {status}; check the API key"),
            });
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return Err(Error::NoContent { path: path.into() });
        }

        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                path: path.into(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
