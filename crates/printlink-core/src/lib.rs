//! Client-side state reconciliation for printer monitoring dashboards.
//!
//! The device API delivers partial status snapshots at poll time and keeps
//! larger job/transfer details behind separate endpoints. This crate folds
//! both into one consistent view-model:
//!
//! - **[`Context`]** — Aggregate root. [`Context::update`] fans a combined
//!   status/printer-info payload out to the telemetry mapper, the job and
//!   transfer binders, and the storage merge. Consumers read an owned
//!   [`Snapshot`] or subscribe to changes.
//!
//! - **[`Tracked`]** — Identity-keyed resource slot (`Absent`,
//!   `SummaryOnly`, `WithDetail`). Detail fetched asynchronously is only
//!   attached when the live identity still matches the one it was fetched
//!   for.
//!
//! - **[`LinkState`]** — Normalized device lifecycle state with translation
//!   to display labels.
//!
//! - **[`Monitor`]** — Optional poll loop driving a `Context` from a
//!   [`StatusSource`].
//!
//! - **[`title`]** — Window title and status-line formatting.

pub mod collab;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod model;
pub mod monitor;
pub mod title;

// ── Primary re-exports ──────────────────────────────────────────────
pub use collab::{
    DetailTransport, EnglishLabels, ErrorSink, LogErrorSink, StatusSource, Translator,
};
pub use config::{MonitorConfig, TlsVerification};
pub use context::{Context, Polled, Update};
pub use error::CoreError;
pub use monitor::Monitor;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CameraRef, Job, JobFile, JobProgress, LinkState, PrinterDescriptor, ResourceId, Snapshot,
    StorageList, StorageLocation, Telemetry, Tracked, Transfer, TransferFile, TransferProgress,
};
