//! Report catalogue and generation handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use strum::IntoEnumIterator;
use suraksha_core::{
    DateRange, DeviceStatus, JobStatus, Monitor, OperationsSummary, ReportStatus, ReportTemplate,
    ScheduledReport,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, RangeArg, ReportsArgs, ReportsCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Last Generated")]
    last_generated: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<ReportTemplate>> for TemplateRow {
    fn from(t: &Arc<ReportTemplate>) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name.clone(),
            frequency: t.frequency.clone(),
            last_generated: t.last_generated.clone(),
            description: t.description.clone(),
        }
    }
}

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Recipients")]
    recipients: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl ScheduleRow {
    fn new(s: &Arc<ScheduledReport>, painter: Painter) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            kind: s.kind.clone(),
            schedule: s.schedule.clone(),
            recipients: util::join_or_dash(&s.recipients),
            status: painter.status(s.status.as_ref()),
        }
    }
}

fn range(arg: RangeArg) -> DateRange {
    match arg {
        RangeArg::Last7Days => DateRange::Last7Days,
        RangeArg::Last30Days => DateRange::Last30Days,
        RangeArg::Last90Days => DateRange::Last90Days,
        RangeArg::LastYear => DateRange::LastYear,
    }
}

fn summary_detail(s: &OperationsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}, {} days)", s.title, s.range, s.range.days());
    let _ = writeln!(out);
    let _ = writeln!(out, "Devices:         {}", s.devices.total());
    for status in DeviceStatus::iter() {
        let _ = writeln!(out, "  {:<14} {}", status, s.devices.get(status));
    }
    let _ = writeln!(out, "  {:<14} {}", "low battery", s.low_battery_devices);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Incidents:       {} active, {} resolved",
        s.incidents.active, s.incidents.resolved
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Field Jobs:      {}", s.jobs.total());
    for status in JobStatus::iter() {
        let _ = writeln!(out, "  {:<14} {}", status, s.jobs.get(status));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Citizen Reports: {}", s.citizen_reports.total());
    for status in ReportStatus::iter() {
        let _ = writeln!(out, "  {:<14} {}", status, s.citizen_reports.get(status));
    }
    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(monitor: &Monitor, args: ReportsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        ReportsCommand::Templates => {
            let snap = monitor.report_templates_snapshot();
            let out = output::render_list(
                &format,
                &snap,
                |t| TemplateRow::from(t),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Schedules => {
            let snap = monitor.scheduled_reports_snapshot();
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "scheduled reports");
            }
            let out = output::render_list(
                &format,
                &snap,
                |s| ScheduleRow::new(s, painter),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Generate { template, range: range_arg } => {
            let template = monitor.report_template(&template)?;
            let devices = monitor.devices_snapshot();
            let incidents = monitor.incidents_snapshot();
            let jobs = monitor.field_jobs_snapshot();
            let reports = monitor.citizen_reports_snapshot();

            let summary = OperationsSummary::build(
                &template,
                range(range_arg),
                devices.iter().map(|r| &**r),
                incidents.iter().map(|r| &**r),
                jobs.iter().map(|r| &**r),
                reports.iter().map(|r| &**r),
            );
            tracing::info!(template = %summary.template, range = %summary.range, "report generated");

            let out = output::render_single(&format, &summary, summary_detail, |s| {
                s.template.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_args_keep_their_window() {
        assert_eq!(range(RangeArg::Last7Days).days(), 7);
        assert_eq!(range(RangeArg::Last30Days).days(), 30);
        assert_eq!(range(RangeArg::Last90Days).days(), 90);
        assert_eq!(range(RangeArg::LastYear).days(), 365);
    }
}
