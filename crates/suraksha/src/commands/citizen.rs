//! Citizen report command handlers.

use std::sync::Arc;

use suraksha_core::view::ListFilter;
use suraksha_core::{
    CitizenReport, Command as CoreCommand, CommandResult, CoreError, Locator, Monitor,
    ReportDraft, ReportStatus,
};
use tabled::Tabled;

use crate::cli::{CitizenArgs, CitizenCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
    #[tabled(rename = "Photos")]
    photos: usize,
}

impl ReportRow {
    fn new(r: &CitizenReport, painter: Painter) -> Self {
        Self {
            id: r.id.to_string(),
            title: r.title.clone(),
            location: r.location.clone(),
            status: painter.status(r.status.as_ref()),
            priority: painter.status(r.priority.as_ref()),
            submitted: r.submitted.to_string(),
            photos: r.photos.len(),
        }
    }
}

fn detail(r: &CitizenReport) -> String {
    [
        format!("ID:          {}", r.id),
        format!("Title:       {}", r.title),
        format!("Location:    {}", r.location),
        format!("Status:      {}", r.status),
        format!("Priority:    {}", r.priority),
        format!("Submitted:   {}", r.submitted),
        format!("Description: {}", util::or_dash(r.description.as_deref())),
        format!("Photos:      {}", util::join_or_dash(&r.photos)),
        format!("Response:    {}", util::or_dash(r.response.as_deref())),
    ]
    .join("\n")
}

/// Fields of `citizen submit`, before they become a draft.
pub struct Submission {
    pub title: String,
    pub location: Option<String>,
    pub here: bool,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub photos: Vec<std::path::PathBuf>,
}

/// Fill a report draft from the submit flags. `--here` asks the locator.
pub fn build_draft(submission: Submission, locator: &dyn Locator) -> Result<ReportDraft, CliError> {
    let mut draft = ReportDraft {
        title: submission.title,
        location: submission.location.unwrap_or_default(),
        description: submission.description.unwrap_or_default(),
        phone: submission.phone.unwrap_or_default(),
        photos: Vec::new(),
    };
    if submission.here {
        let coords = draft.use_location(locator)?;
        tracing::debug!(%coords, "report location from configured position");
    }
    draft.attach(&submission.photos);
    Ok(draft)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: CitizenArgs,
    global: &GlobalOpts,
    locator: &dyn Locator,
) -> Result<(), CliError> {
    let format = global.format();
    let painter = Painter::new(&global.color_mode());

    match args.command {
        CitizenCommand::List(list) => {
            let filter: ListFilter<ReportStatus> = util::list_filter(&list)?;
            let snap = filter.apply(&monitor.citizen_reports_snapshot());
            if snap.is_empty() {
                output::note_empty(&format, global.quiet, "reports");
            }
            let out = output::render_list(
                &format,
                &snap,
                |r| ReportRow::new(r, painter),
                |r| r.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CitizenCommand::Get { report } => {
            let r = monitor.citizen_report(&report)?;
            let out = output::render_single(
                &format,
                &r,
                |r: &Arc<CitizenReport>| detail(r),
                |r| r.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CitizenCommand::Submit {
            title,
            location,
            here,
            description,
            phone,
            photos,
        } => {
            let draft = build_draft(
                Submission {
                    title,
                    location,
                    here,
                    description,
                    phone,
                    photos,
                },
                locator,
            )?;
            let result = monitor.execute(CoreCommand::SubmitReport { draft }).await?;
            let CommandResult::CitizenReport(report) = result else {
                return Err(CoreError::Internal("submit returned no report".into()).into());
            };
            if !global.quiet && format == OutputFormat::Table {
                eprintln!("Report {} submitted", report.id);
            }
            let out = output::render_single(&format, &report, detail, |r| r.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use suraksha_core::ConfiguredLocator;

    use super::*;

    fn submission(location: Option<&str>, here: bool) -> Submission {
        Submission {
            title: "Leaning pole".into(),
            location: location.map(Into::into),
            here,
            description: None,
            phone: Some("+91 98470 00000".into()),
            photos: vec!["/tmp/shots/pole.jpg".into(), "closeup.png".into()],
        }
    }

    #[test]
    fn draft_keeps_photo_file_names_only() {
        let draft = build_draft(
            submission(Some("Market Road"), false),
            &ConfiguredLocator::new(None),
        )
        .unwrap();
        assert_eq!(draft.location, "Market Road");
        assert_eq!(draft.photos, vec!["pole.jpg", "closeup.png"]);
    }

    #[test]
    fn here_uses_configured_position() {
        let draft = build_draft(
            submission(None, true),
            &ConfiguredLocator::new(Some((9.9312, 76.2673))),
        )
        .unwrap();
        assert_eq!(draft.location, "9.931200, 76.267300");
    }

    #[test]
    fn here_without_position_fails() {
        let err = build_draft(submission(None, true), &ConfiguredLocator::new(None)).unwrap_err();
        assert!(matches!(err, CliError::LocationUnavailable));
    }
}
