// ── Domain model ──
//
// Canonical record types shared by the CLI and TUI. Every record is an
// immutable value; the store hands out `Arc` snapshots.

pub mod analytics;
pub mod citizen;
pub mod device;
pub mod field_job;
pub mod incident;
pub mod record_id;
pub mod reporting;
pub mod status;
pub mod team;
pub mod telemetry;

pub use analytics::{
    Analytics, FailurePrediction, ModelMetrics, PRIORITY_RISK_SCORE, RiskDistribution, RiskFactor,
};
pub use citizen::CitizenReport;
pub use device::{Device, LOW_BATTERY_THRESHOLD};
pub use field_job::FieldJob;
pub use incident::{Incident, IncidentAction};
pub use record_id::{Percent, RecordId};
pub use reporting::{Alert, ReportTemplate, ScheduledReport};
pub use status::{
    AccountStatus, AlertLevel, DeviceStatus, IncidentActionKind, IncidentStatus, IncidentType,
    IntegrationStatus, JobStatus, ReportStatus, RiskBand, ScheduleStatus, Severity, UserRole,
    parse_variant, title_case,
};
pub use team::{Integration, UserAccount};
pub use telemetry::{Telemetry, TelemetryAlert};
