// ── Live telemetry ──
//
// Replaced wholesale on every status poll. Fields the printer did not
// report stay `None`; no defaults are invented here.

use serde::{Deserialize, Serialize};

/// Current and target temperature of one heater, in °C.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: Option<f64>,
    pub target: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperatures {
    pub nozzle: Temperature,
    pub bed: Temperature,
}

/// Toolhead position in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// Fan speeds in RPM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fans {
    pub hotend: Option<f64>,
    pub print: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub temperature: Temperatures,
    pub axis: Axes,
    /// Flow factor in percent.
    pub flow: Option<f64>,
    /// Speed factor in percent.
    pub speed: Option<f64>,
    pub fan: Fans,
}
