//! Field job command handlers.

use std::sync::Arc;

use serde::Serialize;
use suraksha_core::view::ListFilter;
use suraksha_core::{FieldJob, JobStatus, Monitor};
use tabled::Tabled;

use crate::cli::{GlobalOpts, JobsArgs, JobsCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Pole")]
    pole: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "ETA")]
    eta: String,
    #[tabled(rename = "Assigned")]
    assigned: String,
}

impl JobRow {
    fn new(j: &Arc<FieldJob>, painter: Painter) -> Self {
        Self {
            id: j.id.to_string(),
            pole: j.pole_id.clone(),
            title: j.title.clone(),
            priority: painter.status(j.priority.as_ref()),
            status: painter.status(&j.status.to_string()),
            distance: format!("{:.1} km", j.distance_km),
            eta: format!("{} min", j.eta_minutes),
            assigned: j.assigned_to.clone(),
        }
    }
}

/// `jobs navigate` result.
#[derive(Serialize)]
struct Directions {
    job: String,
    pole_id: String,
    destination: String,
    url: String,
}

fn detail(j: &Arc<FieldJob>) -> String {
    let mut lines = vec![
        format!("ID:          {}", j.id),
        format!("Pole:        {}", j.pole_id),
        format!("Title:       {}", j.title),
        format!("Priority:    {}", j.priority),
        format!("Status:      {}", j.status),
        format!("Location:    {}", j.location),
        format!("Coordinates: {}", j.coordinates),
        format!("Distance:    {:.1} km (ETA {} min)", j.distance_km, j.eta_minutes),
        format!("Assigned To: {}", j.assigned_to),
        format!("Created:     {}", j.created),
        "Equipment:".into(),
    ];
    lines.extend(j.equipment.iter().map(|item| format!("  - {item}")));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(monitor: &Monitor, args: JobsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        JobsCommand::List(list) => {
            let filter: ListFilter<JobStatus> = util::list_filter(&list)?;
            let snap = filter.apply(&monitor.field_jobs_snapshot());
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "jobs");
            }
            let out = output::render_list(
                &format,
                &snap,
                |j| JobRow::new(j, painter),
                |j| j.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        JobsCommand::Get { job } => {
            let j = monitor.job(&job)?;
            let out = output::render_single(&format, &j, detail, |j| j.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        JobsCommand::Navigate { job } => {
            let j = monitor.job(&job)?;
            let directions = Directions {
                job: j.id.to_string(),
                pole_id: j.pole_id.clone(),
                destination: j.coordinates.to_string(),
                url: j.coordinates.directions_url()?.to_string(),
            };
            let out = output::render_single(
                &format,
                &directions,
                |d| d.url.clone(),
                |d| d.url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
