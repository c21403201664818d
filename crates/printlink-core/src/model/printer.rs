// ── Static printer descriptor ──

use serde::{Deserialize, Serialize};

/// Printer identity and configuration from the info endpoint.
/// Replaced wholesale whenever a new descriptor arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterDescriptor {
    pub name: Option<String>,
    pub location: Option<String>,
    pub farm_mode: Option<bool>,
    /// Millimetres.
    pub nozzle_diameter: Option<f64>,
    /// °C.
    pub min_extrusion_temp: Option<f64>,
    pub serial: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraRef {
    pub id: Option<String>,
}
