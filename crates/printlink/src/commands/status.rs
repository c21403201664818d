//! `printlink status`: poll once, wait for details, render.

use tabled::Tabled;

use printlink_core::title::{printer_label, window_title};
use printlink_core::{EnglishLabels, Monitor, Snapshot, StorageLocation};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, or_dash};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct StorageRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Read-only")]
    read_only: String,
    #[tabled(rename = "Free")]
    free: String,
}

impl From<&StorageLocation> for StorageRow {
    fn from(s: &StorageLocation) -> Self {
        Self {
            path: s.path.clone(),
            name: or_dash(s.name.as_deref()),
            read_only: or_dash(s.read_only),
            free: output::bytes(s.free_space),
        }
    }
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    monitor.poll_once().await?;
    monitor.context().settle().await;

    let snapshot = monitor.context().snapshot();
    let rendered = output::render_single(global.output, &*snapshot, detail_view, |s| {
        window_title(s, &EnglishLabels)
    })?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

// ── Table view ───────────────────────────────────────────────────────

fn row(field: &'static str, value: impl Into<String>) -> FieldRow {
    FieldRow {
        field,
        value: value.into(),
    }
}

fn detail_view(snap: &Snapshot) -> String {
    let t = &snap.telemetry;
    let mut rows = vec![
        row("Printer", non_empty(printer_label(snap))),
        row("State", snap.state.translate(&EnglishLabels)),
        row(
            "Nozzle",
            output::temperature(t.temperature.nozzle.current, t.temperature.nozzle.target),
        ),
        row(
            "Bed",
            output::temperature(t.temperature.bed.current, t.temperature.bed.target),
        ),
        row(
            "Position",
            format!(
                "X {} Y {} Z {}",
                or_dash(t.axis.x),
                or_dash(t.axis.y),
                or_dash(t.axis.z)
            ),
        ),
        row(
            "Flow / Speed",
            format!("{}% / {}%", or_dash(t.flow), or_dash(t.speed)),
        ),
        row(
            "Fans",
            format!(
                "hotend {} / print {} rpm",
                or_dash(t.fan.hotend),
                or_dash(t.fan.print)
            ),
        ),
    ];

    if let (Some(id), Some(summary)) = (snap.job.id(), snap.job.summary()) {
        let name = snap
            .job
            .file()
            .and_then(|f| f.display_name.clone().or_else(|| f.name.clone()));
        rows.push(row("Job", name.unwrap_or_else(|| format!("#{id}"))));
        rows.push(row("Progress", percent(summary.progress)));
        rows.push(row("Printing", output::duration(summary.time_printing)));
        rows.push(row("Remaining", output::duration(summary.time_remaining)));
    }

    if let (Some(id), Some(summary)) = (snap.transfer.id(), snap.transfer.summary()) {
        let name = snap.transfer.file().and_then(|f| f.display_name.clone());
        rows.push(row("Transfer", name.unwrap_or_else(|| format!("#{id}"))));
        rows.push(row("Transferred", output::bytes(summary.data_transferred)));
        rows.push(row("Transfer progress", percent(summary.progress)));
    }

    if let Some(camera) = &snap.camera {
        rows.push(row("Camera", or_dash(camera.id.as_deref())));
    }
    rows.push(row(
        "Updated",
        snap.updated_at
            .map_or_else(|| "never".into(), |t| t.format("%H:%M:%S UTC").to_string()),
    ));

    let mut out = output::render_table(&rows);
    if !snap.storage.is_empty() {
        let storage: Vec<StorageRow> = snap.storage.iter().map(StorageRow::from).collect();
        out.push('\n');
        out.push_str(&output::render_table(&storage));
    }
    out
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.1}%"))
}

fn non_empty(s: String) -> String {
    if s.is_empty() { "-".into() } else { s }
}
