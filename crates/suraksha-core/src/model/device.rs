// ── Device domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record_id::{Percent, RecordId};
use super::status::DeviceStatus;

/// Battery level below which a device is flagged for replacement.
pub const LOW_BATTERY_THRESHOLD: u8 = 30;

/// Firmware line currently rolled out to the fleet.
pub const CURRENT_FIRMWARE_PREFIX: &str = "v2.1";

/// A pole-mounted sensor unit as seen by the device registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: RecordId,
    /// Unique display code painted on the pole, e.g. `KL-003-KCH`.
    pub pole_id: String,
    pub region: String,
    pub location: String,
    pub status: DeviceStatus,
    pub battery: Percent,
    /// Human-readable recency, e.g. "2 min ago".
    pub last_seen: String,
    pub firmware: String,
    /// Last status message reported by the unit.
    pub last_message: String,
    pub installed: NaiveDate,
}

impl Device {
    pub fn is_low_battery(&self) -> bool {
        self.battery.get() < LOW_BATTERY_THRESHOLD
    }

    pub fn has_current_firmware(&self) -> bool {
        self.firmware.starts_with(CURRENT_FIRMWARE_PREFIX)
    }

    /// Whether `identifier` names this device by id or pole code.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.id.as_str() == identifier || self.pole_id.eq_ignore_ascii_case(identifier)
    }
}
