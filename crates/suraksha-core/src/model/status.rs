// ── Closed status vocabularies ──
//
// Every status, severity and priority value is a closed enum. Text
// forms are snake_case (except `JobStatus::InProgress`, which the field
// app writes as `in-progress`) and parse case-insensitively.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::CoreError;

/// Health label reported for a pole-mounted device.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeviceStatus {
    Healthy,
    Warning,
    Critical,
    Offline,
}

/// What kind of event raised an incident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IncidentType {
    ConductorBreak,
    EquipmentFailure,
    MaintenanceRequired,
    CitizenReport,
}

/// Shared urgency scale: incident severity, job and report priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Incident workflow status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IncidentStatus {
    New,
    Acknowledged,
    Investigating,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl IncidentStatus {
    /// Still needs attention from the control room or a field team.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::New | Self::Acknowledged | Self::Investigating | Self::Assigned | Self::InProgress
        )
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

/// Entry kind in an incident's action log.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IncidentActionKind {
    Acknowledged,
    Assigned,
    Commented,
    Escalated,
    Resolved,
}

/// Field job progress.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum JobStatus {
    Assigned,
    #[serde(rename = "in-progress", alias = "in_progress")]
    #[strum(to_string = "in-progress", serialize = "in_progress")]
    InProgress,
    Completed,
    Pending,
}

/// Lifecycle of a citizen-submitted hazard report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReportStatus {
    Submitted,
    UnderReview,
    Investigating,
    Resolved,
}

/// Level of a dashboard alert.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AlertLevel {
    Critical,
    Warning,
}

/// Whether a scheduled report is currently being sent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScheduleStatus {
    Active,
    Paused,
}

/// Failure-risk band of a pole or a risk factor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Band of a 0-100 risk score: 0-30 low, 31-70 medium, 71-100 high.
    pub fn of_score(score: u8) -> Self {
        match score {
            0..=30 => Self::Low,
            31..=70 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Role of a control-room or field account.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UserRole {
    FieldTechnician,
    SystemAdministrator,
    Supervisor,
    SafetyInspector,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// Link state of an external integration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IntegrationStatus {
    Connected,
    Disconnected,
}

/// Parse one of the closed vocabularies above, naming the accepted
/// values in the error.
pub fn parse_variant<T>(field: &'static str, raw: &str) -> Result<T, CoreError>
where
    T: FromStr + IntoEnumIterator + Display,
{
    raw.parse::<T>().map_err(|_| CoreError::InvalidValue {
        field,
        value: raw.to_owned(),
        expected: T::iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "),
    })
}

/// Human label: `in_progress` → `In Progress`.
pub fn title_case(raw: &str) -> String {
    raw.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn device_status_round_trips_text() {
        assert_eq!(DeviceStatus::Critical.to_string(), "critical");
        assert_eq!("OFFLINE".parse::<DeviceStatus>().unwrap(), DeviceStatus::Offline);
    }

    #[test]
    fn job_status_uses_hyphenated_form() {
        assert_eq!(JobStatus::InProgress.to_string(), "in-progress");
        assert_eq!("in-progress".parse::<JobStatus>().unwrap(), JobStatus::InProgress);
        assert_eq!("in_progress".parse::<JobStatus>().unwrap(), JobStatus::InProgress);
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn incident_status_partitions() {
        for status in IncidentStatus::iter() {
            assert_ne!(status.is_active(), status.is_resolved(), "{status}");
        }
    }

    #[test]
    fn parse_variant_lists_expected_values() {
        let err = parse_variant::<Severity>("severity", "urgent").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("urgent"));
        assert!(msg.contains("critical, high, medium, low"));
    }

    #[test]
    fn risk_bands_follow_score_ranges() {
        assert_eq!(RiskBand::of_score(30), RiskBand::Low);
        assert_eq!(RiskBand::of_score(31), RiskBand::Medium);
        assert_eq!(RiskBand::of_score(70), RiskBand::Medium);
        assert_eq!(RiskBand::of_score(71), RiskBand::High);
        assert_eq!("field_technician".parse::<UserRole>().unwrap(), UserRole::FieldTechnician);
    }

    #[test]
    fn title_case_handles_separators() {
        assert_eq!(title_case("in_progress"), "In Progress");
        assert_eq!(title_case("in-progress"), "In Progress");
        assert_eq!(title_case("healthy"), "Healthy");
    }
}
