// ── Incident domain types ──

use serde::{Deserialize, Serialize};

use super::record_id::{Percent, RecordId};
use super::status::{IncidentActionKind, IncidentStatus, IncidentType, Severity};
use crate::error::CoreError;

/// One entry in an incident's append-only action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentAction {
    pub id: RecordId,
    pub kind: IncidentActionKind,
    pub user: String,
    /// Display timestamp as entered by the operator console.
    pub timestamp: String,
    pub details: String,
}

/// A safety incident raised by detection, monitoring or a citizen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: RecordId,
    pub pole_id: String,
    pub kind: IncidentType,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub location: String,
    pub ai_confidence: Option<Percent>,
    pub reported_by: String,
    pub assigned_to: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub evidence: Vec<String>,
    pub actions: Vec<IncidentAction>,
}

impl Incident {
    /// Append an operator comment to the action log.
    ///
    /// The text is trimmed; blank comments are rejected. Action ids are
    /// sequential within the incident.
    pub fn add_comment(
        &mut self,
        user: impl Into<String>,
        details: &str,
        timestamp: impl Into<String>,
    ) -> Result<&IncidentAction, CoreError> {
        let details = details.trim();
        if details.is_empty() {
            return Err(CoreError::validation("comment cannot be empty"));
        }

        let timestamp = timestamp.into();
        self.actions.push(IncidentAction {
            id: RecordId::new((self.actions.len() + 1).to_string()),
            kind: IncidentActionKind::Commented,
            user: user.into(),
            timestamp: timestamp.clone(),
            details: details.to_owned(),
        });
        self.updated_at = timestamp;

        self.actions
            .last()
            .ok_or_else(|| CoreError::Internal("action log empty after append".into()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;

    fn first_incident() -> Incident {
        fixtures::incidents().into_iter().next().unwrap()
    }

    #[test]
    fn add_comment_appends_trimmed_entry() {
        let mut incident = first_incident();
        let before = incident.actions.len();

        let action = incident
            .add_comment("Current User", "  crew on site  ", "15:02:11")
            .unwrap()
            .clone();

        assert_eq!(incident.actions.len(), before + 1);
        assert_eq!(action.kind, IncidentActionKind::Commented);
        assert_eq!(action.details, "crew on site");
        assert_eq!(action.id.as_str(), "4");
        assert_eq!(incident.updated_at, "15:02:11");
    }

    #[test]
    fn add_comment_rejects_blank_text() {
        let mut incident = first_incident();
        let before = incident.clone();

        let err = incident.add_comment("Current User", "   \t", "15:02:11").unwrap_err();

        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(incident, before);
    }

    #[test]
    fn add_comment_on_empty_log_starts_at_one() {
        let mut incident = fixtures::incidents().into_iter().nth(2).unwrap();
        assert!(incident.actions.is_empty());
        let action = incident.add_comment("Control Room", "Acknowledged", "19:40:00").unwrap();
        assert_eq!(action.id.as_str(), "1");
    }
}
