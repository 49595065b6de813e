//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use suraksha_core::{
    Alert, Analytics, CitizenReport, Device, FieldJob, Incident, Integration, RecordId,
    ReportDraft, ReportTemplate, ScheduledReport, Telemetry, UserAccount,
};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A status-bar message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Data Events (from suraksha-core streams) ──────────────────
    DevicesUpdated(Arc<Vec<Arc<Device>>>),
    IncidentsUpdated(Arc<Vec<Arc<Incident>>>),
    JobsUpdated(Arc<Vec<Arc<FieldJob>>>),
    CitizenReportsUpdated(Arc<Vec<Arc<CitizenReport>>>),
    TelemetryUpdated(Arc<Vec<Arc<Telemetry>>>),
    AlertsUpdated(Arc<Vec<Arc<Alert>>>),
    ReportTemplatesUpdated(Arc<Vec<Arc<ReportTemplate>>>),
    ScheduledReportsUpdated(Arc<Vec<Arc<ScheduledReport>>>),
    AnalyticsUpdated(Arc<Analytics>),
    UsersUpdated(Arc<Vec<Arc<UserAccount>>>),
    IntegrationsUpdated(Arc<Vec<Arc<Integration>>>),

    /// Whether live updates are flowing.
    LiveState(bool),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),

    // ── Commands ──────────────────────────────────────────────────
    SubmitComment { incident: RecordId, text: String },
    SubmitReport(ReportDraft),
    /// Pause live updates if they flow, resume them otherwise.
    ToggleLive,
}

impl Action {
    /// Store snapshots and monitor state every screen keeps in sync with.
    pub fn is_data(&self) -> bool {
        matches!(
            self,
            Self::DevicesUpdated(_)
                | Self::IncidentsUpdated(_)
                | Self::JobsUpdated(_)
                | Self::CitizenReportsUpdated(_)
                | Self::TelemetryUpdated(_)
                | Self::AlertsUpdated(_)
                | Self::ReportTemplatesUpdated(_)
                | Self::ScheduledReportsUpdated(_)
                | Self::AnalyticsUpdated(_)
                | Self::UsersUpdated(_)
                | Self::IntegrationsUpdated(_)
                | Self::LiveState(_)
        )
    }
}
