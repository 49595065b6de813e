// ── Central reactive data store ──
//
// Thread-safe storage for every dashboard record type. Mutations are
// broadcast to subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::EntityCollection;
use crate::model::{
    Alert, Analytics, CitizenReport, Device, FieldJob, Incident, Integration, RecordId,
    ReportTemplate, ScheduledReport, Telemetry, UserAccount,
};
use crate::stream::EntityStream;

/// Central reactive store for all dashboard records.
///
/// Reads never block writers for long: lookups hit one `DashMap`
/// shard and snapshots are shared `Arc`s.
pub struct DataStore {
    pub(crate) devices: EntityCollection<Device>,
    pub(crate) incidents: EntityCollection<Incident>,
    pub(crate) field_jobs: EntityCollection<FieldJob>,
    pub(crate) citizen_reports: EntityCollection<CitizenReport>,
    pub(crate) telemetry: EntityCollection<Telemetry>,
    pub(crate) alerts: EntityCollection<Alert>,
    pub(crate) report_templates: EntityCollection<ReportTemplate>,
    pub(crate) scheduled_reports: EntityCollection<ScheduledReport>,
    pub(crate) users: EntityCollection<UserAccount>,
    pub(crate) integrations: EntityCollection<Integration>,
    /// Replaced as a whole; not keyed.
    pub(crate) analytics: watch::Sender<Arc<Analytics>>,
    pub(crate) last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        let (analytics, _) = watch::channel(Arc::new(Analytics::default()));

        Self {
            devices: EntityCollection::new(),
            incidents: EntityCollection::new(),
            field_jobs: EntityCollection::new(),
            citizen_reports: EntityCollection::new(),
            telemetry: EntityCollection::new(),
            alerts: EntityCollection::new(),
            report_templates: EntityCollection::new(),
            scheduled_reports: EntityCollection::new(),
            users: EntityCollection::new(),
            integrations: EntityCollection::new(),
            analytics,
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn devices_snapshot(&self) -> Arc<Vec<Arc<Device>>> {
        self.devices.snapshot()
    }

    pub fn incidents_snapshot(&self) -> Arc<Vec<Arc<Incident>>> {
        self.incidents.snapshot()
    }

    pub fn field_jobs_snapshot(&self) -> Arc<Vec<Arc<FieldJob>>> {
        self.field_jobs.snapshot()
    }

    pub fn citizen_reports_snapshot(&self) -> Arc<Vec<Arc<CitizenReport>>> {
        self.citizen_reports.snapshot()
    }

    pub fn telemetry_snapshot(&self) -> Arc<Vec<Arc<Telemetry>>> {
        self.telemetry.snapshot()
    }

    pub fn alerts_snapshot(&self) -> Arc<Vec<Arc<Alert>>> {
        self.alerts.snapshot()
    }

    pub fn report_templates_snapshot(&self) -> Arc<Vec<Arc<ReportTemplate>>> {
        self.report_templates.snapshot()
    }

    pub fn scheduled_reports_snapshot(&self) -> Arc<Vec<Arc<ScheduledReport>>> {
        self.scheduled_reports.snapshot()
    }

    pub fn users_snapshot(&self) -> Arc<Vec<Arc<UserAccount>>> {
        self.users.snapshot()
    }

    pub fn integrations_snapshot(&self) -> Arc<Vec<Arc<Integration>>> {
        self.integrations.snapshot()
    }

    pub fn analytics_snapshot(&self) -> Arc<Analytics> {
        self.analytics.borrow().clone()
    }

    // ── Single-record lookups ────────────────────────────────────────

    /// Device by record id or pole code.
    pub fn device(&self, identifier: &str) -> Option<Arc<Device>> {
        self.devices
            .get_by_key(&RecordId::from(identifier))
            .or_else(|| self.devices.find(|d| d.matches_identifier(identifier)))
    }

    /// Incident by id (case-insensitive).
    pub fn incident(&self, identifier: &str) -> Option<Arc<Incident>> {
        self.incidents
            .get_by_key(&RecordId::from(identifier))
            .or_else(|| {
                self.incidents
                    .find(|i| i.id.as_str().eq_ignore_ascii_case(identifier))
            })
    }

    /// Field job by id (case-insensitive) or pole code.
    pub fn field_job(&self, identifier: &str) -> Option<Arc<FieldJob>> {
        self.field_jobs
            .get_by_key(&RecordId::from(identifier))
            .or_else(|| {
                self.field_jobs.find(|j| {
                    j.id.as_str().eq_ignore_ascii_case(identifier)
                        || j.pole_id.eq_ignore_ascii_case(identifier)
                })
            })
    }

    pub fn citizen_report(&self, identifier: &str) -> Option<Arc<CitizenReport>> {
        self.citizen_reports
            .get_by_key(&RecordId::from(identifier))
            .or_else(|| {
                self.citizen_reports
                    .find(|r| r.id.as_str().eq_ignore_ascii_case(identifier))
            })
    }

    /// Telemetry reading by id or pole code.
    pub fn telemetry(&self, identifier: &str) -> Option<Arc<Telemetry>> {
        self.telemetry
            .get_by_key(&RecordId::from(identifier))
            .or_else(|| self.telemetry.find(|t| t.matches_identifier(identifier)))
    }

    pub fn report_template(&self, identifier: &str) -> Option<Arc<ReportTemplate>> {
        self.report_templates.get_by_key(&RecordId::from(identifier))
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn incident_count(&self) -> usize {
        self.incidents.len()
    }

    pub fn citizen_report_count(&self) -> usize {
        self.citizen_reports.len()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_devices(&self) -> EntityStream<Device> {
        EntityStream::new(self.devices.subscribe())
    }

    pub fn subscribe_incidents(&self) -> EntityStream<Incident> {
        EntityStream::new(self.incidents.subscribe())
    }

    pub fn subscribe_field_jobs(&self) -> EntityStream<FieldJob> {
        EntityStream::new(self.field_jobs.subscribe())
    }

    pub fn subscribe_citizen_reports(&self) -> EntityStream<CitizenReport> {
        EntityStream::new(self.citizen_reports.subscribe())
    }

    pub fn subscribe_telemetry(&self) -> EntityStream<Telemetry> {
        EntityStream::new(self.telemetry.subscribe())
    }

    pub fn subscribe_alerts(&self) -> EntityStream<Alert> {
        EntityStream::new(self.alerts.subscribe())
    }

    pub fn subscribe_report_templates(&self) -> EntityStream<ReportTemplate> {
        EntityStream::new(self.report_templates.subscribe())
    }

    pub fn subscribe_scheduled_reports(&self) -> EntityStream<ScheduledReport> {
        EntityStream::new(self.scheduled_reports.subscribe())
    }

    pub fn subscribe_users(&self) -> EntityStream<UserAccount> {
        EntityStream::new(self.users.subscribe())
    }

    pub fn subscribe_integrations(&self) -> EntityStream<Integration> {
        EntityStream::new(self.integrations.subscribe())
    }

    pub fn subscribe_analytics(&self) -> watch::Receiver<Arc<Analytics>> {
        self.analytics.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
