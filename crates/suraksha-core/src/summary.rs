// ── Operations report summaries ──
//
// What `reports generate` produces: a roll-up of the current tallies
// for one report template, headed with a named date range.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::model::{
    CitizenReport, Device, DeviceStatus, FieldJob, Incident, JobStatus, RecordId, ReportStatus,
    ReportTemplate,
};
use crate::view::{Tally, tally};

/// Reporting window offered by the report generator.
///
/// Only a label for the summary heading. Records carry display strings
/// rather than timestamps, so the range never scopes the counts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DateRange {
    #[serde(rename = "last_7_days")]
    #[strum(to_string = "last_7_days")]
    Last7Days,
    #[default]
    #[serde(rename = "last_30_days")]
    #[strum(to_string = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_90_days")]
    #[strum(to_string = "last_90_days")]
    Last90Days,
    LastYear,
}

impl DateRange {
    pub fn days(self) -> u32 {
        match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
            Self::LastYear => 365,
        }
    }
}

/// Incident counts split the way the incident tabs split them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncidentCounts {
    pub active: usize,
    pub resolved: usize,
}

/// Generated report contents. Counts cover every record in the store
/// whatever `range` says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationsSummary {
    pub template: RecordId,
    pub title: String,
    pub range: DateRange,
    pub devices: Tally<DeviceStatus>,
    pub low_battery_devices: usize,
    pub incidents: IncidentCounts,
    pub jobs: Tally<JobStatus>,
    pub citizen_reports: Tally<ReportStatus>,
}

impl OperationsSummary {
    pub fn build<'a>(
        template: &ReportTemplate,
        range: DateRange,
        devices: impl IntoIterator<Item = &'a Device> + Clone,
        incidents: impl IntoIterator<Item = &'a Incident>,
        jobs: impl IntoIterator<Item = &'a FieldJob>,
        citizen_reports: impl IntoIterator<Item = &'a CitizenReport>,
    ) -> Self {
        let (active, resolved) = incidents.into_iter().fold((0, 0), |(a, r), incident| {
            if incident.status.is_resolved() {
                (a, r + 1)
            } else {
                (a + 1, r)
            }
        });

        Self {
            template: template.id.clone(),
            title: template.name.clone(),
            range,
            devices: tally(devices.clone()),
            low_battery_devices: devices.into_iter().filter(|d| d.is_low_battery()).count(),
            incidents: IncidentCounts { active, resolved },
            jobs: tally(jobs),
            citizen_reports: tally(citizen_reports),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;

    #[test]
    fn summary_rolls_up_fixture_tallies() {
        let template = fixtures::report_templates().into_iter().next().unwrap();
        let devices = fixtures::devices();
        let incidents = fixtures::incidents();
        let jobs = fixtures::field_jobs();
        let reports = fixtures::citizen_reports();

        let summary = OperationsSummary::build(
            &template,
            DateRange::default(),
            &devices,
            &incidents,
            &jobs,
            &reports,
        );

        assert_eq!(summary.template.as_str(), "incident_summary");
        assert_eq!(summary.range, DateRange::Last30Days);
        assert_eq!(summary.devices.total(), 5);
        assert_eq!(summary.low_battery_devices, 1);
        assert_eq!(summary.incidents, IncidentCounts { active: 3, resolved: 0 });
        assert_eq!(summary.jobs.get(JobStatus::Pending), 1);
        assert_eq!(summary.citizen_reports.get(ReportStatus::Resolved), 1);
    }

    #[test]
    fn date_range_does_not_scope_counts() {
        let template = fixtures::report_templates().into_iter().next().unwrap();
        let devices = fixtures::devices();
        let incidents = fixtures::incidents();
        let jobs = fixtures::field_jobs();
        let reports = fixtures::citizen_reports();
        let build = |range| {
            OperationsSummary::build(&template, range, &devices, &incidents, &jobs, &reports)
        };

        let week = build(DateRange::Last7Days);
        let year = build(DateRange::LastYear);
        assert_eq!(week.devices, year.devices);
        assert_eq!(week.incidents, year.incidents);
        assert_eq!(week.jobs, year.jobs);
        assert_eq!(week.citizen_reports, year.citizen_reports);
        assert_eq!(week.range, DateRange::Last7Days);
        assert_eq!(year.range, DateRange::LastYear);
    }

    #[test]
    fn date_range_parses_snake_case() {
        assert_eq!("last_7_days".parse::<DateRange>().unwrap(), DateRange::Last7Days);
        assert_eq!(DateRange::LastYear.to_string(), "last_year");
        assert_eq!(DateRange::Last90Days.days(), 90);
    }
}
