// ── API-to-model conversions ──
//
// Explicit field-by-field mappings from raw `printlink_api` shapes into
// view-model types. Each `From` impl is the complete list of fields that
// survive an update; nothing is carried over implicitly.

use printlink_api::models::{
    CameraStatus, FileMeta as RawFileMeta, FileRefs as RawFileRefs, InfoResponse, JobResponse,
    JobSummary, PrinterTelemetry, StorageEntry, TransferResponse, TransferSummary,
};

use crate::model::{
    Axes, CameraRef, Fans, FileMeta, FileRefs, JobFile, JobProgress, PrinterDescriptor,
    StorageLocation, Telemetry, Temperature, Temperatures, TransferFile, TransferProgress,
};

// ── Telemetry ──────────────────────────────────────────────────────

impl From<&PrinterTelemetry> for Telemetry {
    fn from(raw: &PrinterTelemetry) -> Self {
        Telemetry {
            temperature: Temperatures {
                nozzle: Temperature {
                    current: raw.temp_nozzle,
                    target: raw.target_nozzle,
                },
                bed: Temperature {
                    current: raw.temp_bed,
                    target: raw.target_bed,
                },
            },
            axis: Axes {
                x: raw.axis_x,
                y: raw.axis_y,
                z: raw.axis_z,
            },
            flow: raw.flow,
            speed: raw.speed,
            fan: Fans {
                hotend: raw.fan_hotend,
                print: raw.fan_print,
            },
        }
    }
}

// ── Job ────────────────────────────────────────────────────────────

impl From<&JobSummary> for JobProgress {
    fn from(raw: &JobSummary) -> Self {
        JobProgress {
            progress: raw.progress,
            time_remaining: raw.time_remaining,
            time_printing: raw.time_printing,
        }
    }
}

impl From<RawFileRefs> for FileRefs {
    fn from(raw: RawFileRefs) -> Self {
        FileRefs {
            download: raw.download,
            icon: raw.icon,
            thumbnail: raw.thumbnail,
        }
    }
}

impl From<RawFileMeta> for FileMeta {
    fn from(raw: RawFileMeta) -> Self {
        FileMeta {
            filament_type: raw.filament_type,
            layer_height: raw.layer_height,
            estimated_print_time: raw.estimated_print_time,
        }
    }
}

impl From<JobResponse> for JobFile {
    fn from(raw: JobResponse) -> Self {
        JobFile {
            name: raw.name,
            display_name: raw.display_name,
            path: raw.path,
            display_path: raw.display_path,
            size: raw.size,
            refs: raw.refs.map(FileRefs::from).unwrap_or_default(),
            meta: raw.meta.map(FileMeta::from).unwrap_or_default(),
        }
    }
}

// ── Transfer ───────────────────────────────────────────────────────

impl From<&TransferSummary> for TransferProgress {
    fn from(raw: &TransferSummary) -> Self {
        TransferProgress {
            progress: raw.progress,
            data_transferred: raw.data_transferred,
            time_transferring: raw.time_transferring,
        }
    }
}

impl From<TransferResponse> for TransferFile {
    fn from(raw: TransferResponse) -> Self {
        TransferFile {
            display_name: raw.display_name,
            path: raw.path,
            size: raw.size,
            to_print: raw.to_print,
        }
    }
}

// ── Storage / printer / camera ─────────────────────────────────────

impl From<StorageEntry> for StorageLocation {
    fn from(raw: StorageEntry) -> Self {
        StorageLocation {
            path: raw.path,
            name: raw.name,
            read_only: raw.read_only,
            free_space: raw.free_space,
        }
    }
}

impl From<InfoResponse> for PrinterDescriptor {
    fn from(raw: InfoResponse) -> Self {
        PrinterDescriptor {
            name: raw.name,
            location: raw.location,
            farm_mode: raw.farm_mode,
            nozzle_diameter: raw.nozzle_diameter,
            min_extrusion_temp: raw.min_extrusion_temp,
            serial: raw.serial,
            hostname: raw.hostname,
            port: raw.port,
        }
    }
}

impl From<CameraStatus> for CameraRef {
    fn from(raw: CameraStatus) -> Self {
        CameraRef { id: raw.id }
    }
}
