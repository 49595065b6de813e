// ── Citizen report form ──
//
// Form state for a new hazard report: typed fields, attached photo
// names and an optional "use my location" lookup.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geo::{Coordinates, LocateError, Locator};
use crate::model::{CitizenReport, RecordId, ReportStatus, Severity};

/// Id for the `sequence`-th report filed in `year`: `CR-2024-004`.
pub fn citizen_report_id(year: i32, sequence: usize) -> RecordId {
    RecordId::new(format!("CR-{year}-{sequence:03}"))
}

/// An unsubmitted citizen report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub title: String,
    pub location: String,
    pub description: String,
    pub phone: String,
    /// Attached photo file names. Files are never opened.
    pub photos: Vec<String>,
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach photos by path, keeping only each final path component.
    /// Paths without a file name are skipped.
    pub fn attach<P: AsRef<Path>>(&mut self, paths: impl IntoIterator<Item = P>) {
        self.photos.extend(paths.into_iter().filter_map(|p| {
            p.as_ref()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        }));
    }

    /// Fill the location field from `locator`.
    ///
    /// On failure the field is left untouched and the error returned
    /// for the caller to show.
    pub fn use_location(&mut self, locator: &dyn Locator) -> Result<Coordinates, LocateError> {
        let coords = locator.locate()?;
        self.location = coords.to_string();
        Ok(coords)
    }

    /// Validate and turn the draft into a submitted report, then reset
    /// the form. A failed validation leaves the draft as it was.
    pub fn submit(&mut self, id: RecordId, today: NaiveDate) -> Result<CitizenReport, CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::validation("report title is required"));
        }
        let location = self.location.trim();
        if location.is_empty() {
            return Err(CoreError::validation("report location is required"));
        }
        let description = self.description.trim();

        let report = CitizenReport {
            id,
            title: title.to_owned(),
            location: location.to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            status: ReportStatus::Submitted,
            priority: Severity::Medium,
            submitted: today,
            photos: std::mem::take(&mut self.photos),
            response: None,
        };
        *self = Self::default();
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geo::ConfiguredLocator;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    #[test]
    fn attach_keeps_only_file_names() {
        let mut draft = ReportDraft::new();
        draft.attach(["/home/priya/Pictures/pole.jpg", "wire.png", "/"]);
        assert_eq!(draft.photos, vec!["pole.jpg", "wire.png"]);
    }

    #[test]
    fn use_location_writes_formatted_position() {
        let mut draft = ReportDraft::new();
        let locator = ConfiguredLocator::new(Some((9.9312, 76.2673)));
        draft.use_location(&locator).unwrap();
        assert_eq!(draft.location, "9.931200, 76.267300");
    }

    #[test]
    fn use_location_failure_leaves_field() {
        let mut draft = ReportDraft {
            location: "MG Road".into(),
            ..ReportDraft::default()
        };
        let err = draft.use_location(&ConfiguredLocator::default()).unwrap_err();
        assert_eq!(err, LocateError::Unavailable);
        assert_eq!(draft.location, "MG Road");
    }

    #[test]
    fn submit_builds_report_and_resets() {
        let mut draft = ReportDraft {
            title: "  Leaning pole  ".into(),
            location: "Beach Road, Kozhikode".into(),
            description: String::new(),
            phone: "+91 98765 43210".into(),
            photos: Vec::new(),
        };
        draft.attach(["a.jpg"]);

        let report = draft.submit(citizen_report_id(2024, 4), today()).unwrap();

        assert_eq!(report.id.as_str(), "CR-2024-004");
        assert_eq!(report.title, "Leaning pole");
        assert_eq!(report.status, ReportStatus::Submitted);
        assert_eq!(report.priority, Severity::Medium);
        assert_eq!(report.description, None);
        assert_eq!(report.photos, vec!["a.jpg"]);
        assert_eq!(draft, ReportDraft::default());
    }

    #[test]
    fn submit_requires_title_and_location() {
        let mut draft = ReportDraft {
            title: "Sparks".into(),
            location: "   ".into(),
            ..ReportDraft::default()
        };
        let before = draft.clone();

        let err = draft.submit(citizen_report_id(2024, 4), today()).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(draft, before);

        draft.title.clear();
        draft.location = "Kochi".into();
        assert!(draft.submit(citizen_report_id(2024, 4), today()).is_err());
    }
}
