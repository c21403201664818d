// ── Collaborator interfaces ──
//
// Transport, error reporting, and label translation are injected into the
// core rather than reached through globals, so a `Context` can be driven
// entirely from tests.

use futures_util::future::BoxFuture;
use tracing::warn;

use printlink_api::models::{InfoResponse, JobResponse, StatusResponse, TransferResponse};
use printlink_api::PrinterClient;

use crate::error::CoreError;

/// Fetches the detail records behind the job and transfer endpoints.
pub trait DetailTransport: Send + Sync + 'static {
    fn fetch_job(&self) -> BoxFuture<'_, Result<JobResponse, printlink_api::Error>>;

    fn fetch_transfer(&self) -> BoxFuture<'_, Result<TransferResponse, printlink_api::Error>>;
}

/// Fetches the periodic status snapshot and the static printer info.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(&self) -> BoxFuture<'_, Result<StatusResponse, printlink_api::Error>>;

    fn fetch_info(&self) -> BoxFuture<'_, Result<InfoResponse, printlink_api::Error>>;
}

/// Receives errors the core recovers from but the user may want to see.
pub trait ErrorSink: Send + Sync + 'static {
    fn handle(&self, error: &CoreError);
}

/// Resolves a label key (e.g. `prop.st-printing`) to display text.
/// Must be total: unknown keys still produce some text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

// ── Implementations over the HTTP client ─────────────────────────────

impl DetailTransport for PrinterClient {
    fn fetch_job(&self) -> BoxFuture<'_, Result<JobResponse, printlink_api::Error>> {
        Box::pin(self.job())
    }

    fn fetch_transfer(&self) -> BoxFuture<'_, Result<TransferResponse, printlink_api::Error>> {
        Box::pin(self.transfer())
    }
}

impl StatusSource for PrinterClient {
    fn fetch_status(&self) -> BoxFuture<'_, Result<StatusResponse, printlink_api::Error>> {
        Box::pin(self.status())
    }

    fn fetch_info(&self) -> BoxFuture<'_, Result<InfoResponse, printlink_api::Error>> {
        Box::pin(self.info())
    }
}

// ── Defaults ─────────────────────────────────────────────────────────

/// Error sink that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn handle(&self, error: &CoreError) {
        match std::error::Error::source(error) {
            Some(source) => warn!(error = %error, cause = %source, "printer request failed"),
            None => warn!(error = %error, "printer request failed"),
        }
    }
}

/// Built-in English labels for state keys; other keys are echoed back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl Translator for EnglishLabels {
    fn translate(&self, key: &str) -> String {
        let label = match key {
            "prop.st-idle" => "Idle",
            "prop.st-ready" => "Ready",
            "prop.st-busy" => "Busy",
            "prop.st-printing" => "Printing",
            "prop.st-paused" => "Paused",
            "prop.st-finished" => "Finished",
            "prop.st-stopped" => "Stopped",
            "prop.st-error" => "Error",
            "prop.st-attention" => "Attention",
            "prop.st-unknown" => "Unknown",
            other => other,
        };
        label.to_owned()
    }
}
