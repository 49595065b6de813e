//! Incident command handlers.

use std::sync::Arc;

use suraksha_core::view::{CategoryFilter, IncidentTab, ListFilter};
use suraksha_core::{
    Command as CoreCommand, CommandResult, CoreError, Incident, Monitor, Severity,
};
use tabled::Tabled;

use crate::cli::{GlobalOpts, IncidentTabArg, IncidentsArgs, IncidentsCommand};
use crate::error::CliError;
use crate::output::{self, Painter};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct IncidentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Pole")]
    pole: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Assigned")]
    assigned: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl IncidentRow {
    fn new(i: &Arc<Incident>, painter: Painter) -> Self {
        Self {
            id: i.id.to_string(),
            pole: i.pole_id.clone(),
            kind: i.kind.to_string(),
            severity: painter.status(i.severity.as_ref()),
            status: painter.status(i.status.as_ref()),
            location: i.location.clone(),
            assigned: i.assigned_to.clone().unwrap_or_else(|| "-".into()),
            created: i.created_at.clone(),
        }
    }
}

fn action_log(i: &Incident) -> Vec<String> {
    i.actions
        .iter()
        .map(|a| format!("  [{}] {} {}: {}", a.timestamp, a.user, a.kind, a.details))
        .collect()
}

fn detail(i: &Arc<Incident>) -> String {
    let mut lines = vec![
        format!("ID:          {}", i.id),
        format!("Pole:        {}", i.pole_id),
        format!("Type:        {}", i.kind),
        format!("Severity:    {}", i.severity),
        format!("Status:      {}", i.status),
        format!("Location:    {}", i.location),
        format!(
            "AI Conf.:    {}",
            i.ai_confidence.map_or_else(|| "-".into(), |c| c.to_string())
        ),
        format!("Reported By: {}", i.reported_by),
        format!("Assigned To: {}", i.assigned_to.as_deref().unwrap_or("-")),
        format!("Created:     {}", i.created_at),
        format!("Updated:     {}", i.updated_at),
    ];
    if !i.evidence.is_empty() {
        lines.push("Evidence:".into());
        lines.extend(i.evidence.iter().map(|e| format!("  {e}")));
    }
    lines.push("Actions:".into());
    if i.actions.is_empty() {
        lines.push("  (none yet)".into());
    } else {
        lines.extend(action_log(i));
    }
    lines.join("\n")
}

fn tab(arg: IncidentTabArg) -> IncidentTab {
    match arg {
        IncidentTabArg::Active => IncidentTab::Active,
        IncidentTabArg::Resolved => IncidentTab::Resolved,
        IncidentTabArg::All => IncidentTab::All,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: IncidentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        IncidentsCommand::List {
            tab: tab_arg,
            severity,
            search,
        } => {
            let incident_tab = tab(tab_arg);
            let filter: ListFilter<Severity> =
                ListFilter::new(search, CategoryFilter::parse("severity", &severity)?);
            let snap: Vec<Arc<Incident>> = monitor
                .incidents_snapshot()
                .iter()
                .filter(|i| incident_tab.includes(i.status) && filter.matches(*i))
                .cloned()
                .collect();
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "incidents");
            }
            let out = output::render_list(
                &format,
                &snap,
                |i| IncidentRow::new(i, painter),
                |i| i.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        IncidentsCommand::Get { incident } => {
            let i = monitor.incident(&incident)?;
            let out = output::render_single(&format, &i, detail, |i| i.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        IncidentsCommand::Comment {
            incident,
            text,
            user,
        } => {
            let id = monitor.incident(&incident)?.id.clone();
            let result = monitor
                .execute(CoreCommand::AddComment {
                    incident: id,
                    user,
                    details: text,
                })
                .await?;
            let CommandResult::Incident(updated) = result else {
                return Err(CoreError::Internal("comment returned no incident".into()).into());
            };
            let out = output::render_single(
                &format,
                &updated.actions,
                |_| {
                    let mut lines = vec![format!("Action log for {}:", updated.id)];
                    lines.extend(action_log(&updated));
                    lines.join("\n")
                },
                |actions| {
                    actions
                        .last()
                        .map(|a| a.id.to_string())
                        .unwrap_or_default()
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_args_map_one_to_one() {
        assert_eq!(tab(IncidentTabArg::Active), IncidentTab::Active);
        assert_eq!(tab(IncidentTabArg::Resolved), IncidentTab::Resolved);
        assert_eq!(tab(IncidentTabArg::All), IncidentTab::All);
    }
}
