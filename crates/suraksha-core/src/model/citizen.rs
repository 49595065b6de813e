// ── Citizen report domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record_id::RecordId;
use super::status::{ReportStatus, Severity};

/// A hazard reported by a member of the public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitizenReport {
    pub id: RecordId,
    pub title: String,
    pub location: String,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub priority: Severity,
    pub submitted: NaiveDate,
    /// Attached photo file names. Never uploaded.
    pub photos: Vec<String>,
    /// Reply from the utility once the report is handled.
    pub response: Option<String>,
}
