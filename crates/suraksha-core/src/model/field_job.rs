// ── Field job domain types ──

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::record_id::RecordId;
use super::status::{JobStatus, Severity};
use crate::geo::Coordinates;

/// A repair or maintenance job assigned to a field crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldJob {
    pub id: RecordId,
    pub pole_id: String,
    pub title: String,
    pub priority: Severity,
    pub status: JobStatus,
    pub location: String,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub eta_minutes: u32,
    pub assigned_to: String,
    /// Human-readable age, e.g. "25 min ago".
    pub created: String,
    /// Tools the crew must carry, in checklist order.
    pub equipment: IndexSet<String>,
}

impl FieldJob {
    pub fn is_open(&self) -> bool {
        !matches!(self.status, JobStatus::Completed)
    }
}
