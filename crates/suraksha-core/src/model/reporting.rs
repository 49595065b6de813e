// ── Dashboard alerts and report catalogue ──

use serde::{Deserialize, Serialize};

use super::record_id::{Percent, RecordId};
use super::status::{AlertLevel, ScheduleStatus};

/// Headline alert on the control-room dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: RecordId,
    pub level: AlertLevel,
    pub message: String,
    pub time: String,
    pub confidence: Percent,
}

/// A report that can be generated on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub frequency: String,
    pub last_generated: String,
}

/// A report mailed out on a fixed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReport {
    pub id: RecordId,
    pub name: String,
    pub kind: String,
    pub schedule: String,
    pub recipients: Vec<String>,
    pub status: ScheduleStatus,
}
