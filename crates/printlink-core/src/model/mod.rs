// ── View-model types ──
//
// Canonical, display-ready representation of one printer. Raw API shapes
// live in `printlink_api::models`; `crate::convert` maps between the two.

pub mod job;
pub mod printer;
pub mod resource;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod transfer;

// ── Re-exports ──────────────────────────────────────────────────────

pub use job::{FileMeta, FileRefs, Job, JobFile, JobProgress};
pub use printer::{CameraRef, PrinterDescriptor};
pub use resource::{ResourceId, Tracked, Transition};
pub use snapshot::Snapshot;
pub use state::LinkState;
pub use storage::{StorageList, StorageLocation};
pub use telemetry::{Axes, Fans, Telemetry, Temperature, Temperatures};
pub use transfer::{Transfer, TransferFile, TransferProgress};
