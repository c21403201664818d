// ── View-model snapshot ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CameraRef, Job, LinkState, PrinterDescriptor, StorageList, Telemetry, Transfer};

/// Everything known about one printer at a point in time.
///
/// Owned by [`Context`](crate::Context); consumers receive clones or
/// shared `Arc`s and never mutate it directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: LinkState,
    pub printer: Option<PrinterDescriptor>,
    pub job: Job,
    pub transfer: Transfer,
    pub storage: StorageList,
    pub telemetry: Telemetry,
    pub camera: Option<CameraRef>,
    /// When the last ok status payload was applied.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// How long ago the last status was applied, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.updated_at.map(|t| Utc::now() - t)
    }
}
