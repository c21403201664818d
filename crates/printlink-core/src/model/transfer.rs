// ── File transfer ──

use serde::{Deserialize, Serialize};

use super::resource::Tracked;

/// Transfer fields refreshed on every status poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferProgress {
    /// Completion in percent, 0–100.
    pub progress: Option<f64>,
    /// Bytes.
    pub data_transferred: Option<u64>,
    /// Seconds.
    pub time_transferring: Option<u64>,
}

/// The file being transferred, from the transfer detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferFile {
    pub display_name: Option<String>,
    pub path: Option<String>,
    pub size: Option<u64>,
    /// Start printing once the upload completes.
    pub to_print: Option<bool>,
}

/// The running transfer, if any.
pub type Transfer = Tracked<TransferProgress, TransferFile>;

impl Transfer {
    pub fn progress(&self) -> Option<f64> {
        self.summary().and_then(|s| s.progress)
    }

    pub fn file(&self) -> Option<&TransferFile> {
        self.detail()
    }
}
