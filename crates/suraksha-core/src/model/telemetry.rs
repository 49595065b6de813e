// ── Live telemetry domain types ──

use serde::{Deserialize, Serialize};

use super::record_id::{Percent, RecordId};
use super::status::DeviceStatus;
use crate::geo::Coordinates;

/// Anomaly attached to a telemetry reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryAlert {
    /// Short label, e.g. "Conductor Break".
    pub kind: String,
    pub details: String,
    pub ai_confidence: Option<Percent>,
}

/// Latest reading from a pole-mounted sensor unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub id: RecordId,
    pub pole_id: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub status: DeviceStatus,
    pub last_update: String,
    pub battery: Percent,
    pub solar_charging: bool,
    pub temperature_c: f64,
    pub current_a: f64,
    pub voltage_v: f64,
    /// Peak acceleration in g.
    pub vibration_g: f64,
    pub alert: Option<TelemetryAlert>,
}

impl Telemetry {
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.id.as_str().eq_ignore_ascii_case(identifier)
            || self.pole_id.eq_ignore_ascii_case(identifier)
    }
}
