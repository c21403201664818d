// ── Print job ──

use serde::{Deserialize, Serialize};

use super::resource::Tracked;

/// Job fields refreshed on every status poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JobProgress {
    /// Completion in percent, 0–100.
    pub progress: Option<f64>,
    /// Seconds.
    pub time_remaining: Option<u64>,
    /// Seconds.
    pub time_printing: Option<u64>,
}

/// The file being printed, from the job detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFile {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub path: Option<String>,
    pub display_path: Option<String>,
    pub size: Option<u64>,
    pub refs: FileRefs,
    pub meta: FileMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRefs {
    pub download: Option<String>,
    pub icon: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    pub filament_type: Option<String>,
    pub layer_height: Option<f64>,
    /// Seconds.
    pub estimated_print_time: Option<u64>,
}

/// The active print, if any.
pub type Job = Tracked<JobProgress, JobFile>;

impl Job {
    /// Progress in percent, `None` when no job is running.
    pub fn progress(&self) -> Option<f64> {
        self.summary().and_then(|s| s.progress)
    }

    pub fn file(&self) -> Option<&JobFile> {
        self.detail()
    }
}
