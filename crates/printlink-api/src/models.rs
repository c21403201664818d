// Device API response types
//
// Raw shapes of the `/api/v1/*` endpoints. Every field is optional with
// `#[serde(default)]` because firmware versions disagree on which fields
// are present; the core crate decides what an absent field means.
// Numeric fields decode leniently: a value of the wrong shape becomes
// `None` instead of failing the whole payload.

use serde::{Deserialize, Serialize};

// ── Lenient numbers ──────────────────────────────────────────────────

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::debug;

    /// Any finite JSON number, or a string holding one.
    pub fn opt_f64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(de)?;
        let parsed = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite());
        skipped(&value, parsed.is_some());
        Ok(parsed)
    }

    /// A non-negative whole number. Fractions are rounded; negatives and
    /// non-numbers are dropped.
    pub fn opt_u64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
        let value = Value::deserialize(de)?;
        let parsed = match &value {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
            _ => None,
        };
        skipped(&value, parsed.is_some());
        Ok(parsed)
    }

    pub fn opt_u16<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u16>, D::Error> {
        Ok(opt_u64(de)?.and_then(|v| u16::try_from(v).ok()))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::as_conversions
    )]
    fn whole(v: f64) -> Option<u64> {
        (v.is_finite() && v >= 0.0 && v <= u64::MAX as f64).then(|| v.round() as u64)
    }

    fn skipped(value: &Value, parsed: bool) {
        if !parsed && !value.is_null() {
            debug!(%value, "ignoring malformed numeric field");
        }
    }
}

// ── Status ───────────────────────────────────────────────────────────

/// Combined status snapshot from `GET /api/v1/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub printer: PrinterTelemetry,
    #[serde(default)]
    pub job: Option<JobSummary>,
    #[serde(default)]
    pub storage: Option<StorageField>,
    #[serde(default)]
    pub transfer: Option<TransferSummary>,
    #[serde(default)]
    pub camera: Option<CameraStatus>,
}

/// Live printer telemetry nested inside the status snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterTelemetry {
    /// Raw lifecycle state, e.g. `"PRINTING"`. Case varies by firmware.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub temp_nozzle: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub target_nozzle: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub temp_bed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub target_bed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub axis_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub axis_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub axis_z: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub flow: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub fan_hotend: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub fan_print: Option<f64>,
}

/// Lightweight job fields carried by every status snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub time_remaining: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub time_printing: Option<u64>,
}

/// Lightweight transfer fields carried by every status snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferSummary {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub progress: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub data_transferred: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub time_transferring: Option<u64>,
}

/// One storage location as reported in the status snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "readOnly")]
    pub read_only: Option<bool>,
    #[serde(default, alias = "freeSpace", deserialize_with = "lenient::opt_u64")]
    pub free_space: Option<u64>,
}

/// Storage as sent by the device: older firmware reports the active
/// location as a single object, newer firmware a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StorageField {
    Many(Vec<StorageEntry>),
    One(StorageEntry),
}

impl StorageField {
    /// Flatten into a list regardless of the wire shape.
    pub fn into_entries(self) -> Vec<StorageEntry> {
        match self {
            Self::Many(entries) => entries,
            Self::One(entry) => vec![entry],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraStatus {
    #[serde(default)]
    pub id: Option<String>,
}

// ── Printer info ─────────────────────────────────────────────────────

/// Static printer descriptor from `GET /api/v1/info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub farm_mode: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub nozzle_diameter: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub min_extrusion_temp: Option<f64>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u16")]
    pub port: Option<u16>,
}

// ── Job detail ───────────────────────────────────────────────────────

/// Enriched job detail from `GET /api/v1/job`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub display_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub size: Option<u64>,
    #[serde(default)]
    pub refs: Option<FileRefs>,
    #[serde(default)]
    pub meta: Option<FileMeta>,
}

/// Download and preview links of a print file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileRefs {
    #[serde(default)]
    pub download: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Slicer metadata of a print file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    #[serde(default)]
    pub filament_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub layer_height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub estimated_print_time: Option<u64>,
}

// ── Transfer detail ──────────────────────────────────────────────────

/// Enriched transfer detail from `GET /api/v1/transfer`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferResponse {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub id: Option<u64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub size: Option<u64>,
    #[serde(default)]
    pub to_print: Option<bool>,
}
