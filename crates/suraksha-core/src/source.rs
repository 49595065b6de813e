// ── Record sources ──
//
// Where the store's records come from. The built-in source serves the
// pilot deployment fixtures; a network-backed source plugs in here.

use crate::error::CoreError;
use crate::fixtures;
use crate::model::{
    Alert, Analytics, CitizenReport, Device, FieldJob, Incident, Integration, ReportTemplate,
    ScheduledReport, Telemetry, UserAccount,
};

/// One delivery of records. `None` leaves that collection untouched;
/// `Some` replaces it (upsert then prune).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub devices: Option<Vec<Device>>,
    pub incidents: Option<Vec<Incident>>,
    pub field_jobs: Option<Vec<FieldJob>>,
    pub citizen_reports: Option<Vec<CitizenReport>>,
    pub telemetry: Option<Vec<Telemetry>>,
    pub alerts: Option<Vec<Alert>>,
    pub report_templates: Option<Vec<ReportTemplate>>,
    pub scheduled_reports: Option<Vec<ScheduledReport>>,
    pub analytics: Option<Analytics>,
    pub users: Option<Vec<UserAccount>>,
    pub integrations: Option<Vec<Integration>>,
}

impl Batch {
    /// Keep only the collections a live update refreshes: telemetry
    /// and dashboard alerts. Operator edits to incidents and citizen
    /// reports are never overwritten by a live tick.
    #[must_use]
    pub fn live_only(self) -> Self {
        Self {
            telemetry: self.telemetry,
            alerts: self.alerts,
            ..Self::default()
        }
    }
}

/// Supplier of records for the store.
pub trait TelemetrySource: Send + Sync {
    /// Everything, for the initial load.
    fn fetch(&self) -> Result<Batch, CoreError>;

    /// What a live-update tick applies.
    fn fetch_live(&self) -> Result<Batch, CoreError> {
        self.fetch().map(Batch::live_only)
    }
}

/// Serves the built-in deployment records. Live ticks return the same
/// readings, so subscribers are never woken by them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl TelemetrySource for FixtureSource {
    fn fetch(&self) -> Result<Batch, CoreError> {
        Ok(Batch {
            devices: Some(fixtures::devices()),
            incidents: Some(fixtures::incidents()),
            field_jobs: Some(fixtures::field_jobs()),
            citizen_reports: Some(fixtures::citizen_reports()),
            telemetry: Some(fixtures::telemetry_readings()),
            alerts: Some(fixtures::alerts()),
            report_templates: Some(fixtures::report_templates()),
            scheduled_reports: Some(fixtures::scheduled_reports()),
            analytics: Some(fixtures::analytics()),
            users: Some(fixtures::users()),
            integrations: Some(fixtures::integrations()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn live_batch_only_carries_readings() {
        let batch = FixtureSource.fetch_live().unwrap();
        assert!(batch.devices.is_none());
        assert!(batch.incidents.is_none());
        assert!(batch.citizen_reports.is_none());
        assert!(batch.analytics.is_none());
        assert_eq!(batch.telemetry.map(|t| t.len()), Some(8));
        assert_eq!(batch.alerts.map(|a| a.len()), Some(3));
    }
}
