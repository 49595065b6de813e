//! Field Ops screen: maintenance jobs for the crews, with equipment
//! lists and a directions link for each job site.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};

use suraksha_core::view::{Detail, ListFilter};
use suraksha_core::{FieldJob, JobStatus, RecordId};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;
use crate::widgets::table_nav::TableNav;
use crate::widgets::text_input::{SearchField, SearchOutcome};
use crate::widgets::{self, field, hints, panel};

pub struct FieldOpsScreen {
    focused: bool,
    jobs: Arc<Vec<Arc<FieldJob>>>,
    visible: Vec<Arc<FieldJob>>,
    filter: ListFilter<JobStatus>,
    search: SearchField,
    detail: Detail<RecordId>,
    /// Directions link for the open job, once requested.
    directions: Option<(RecordId, String)>,
    nav: TableNav,
}

impl FieldOpsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            jobs: Arc::new(Vec::new()),
            visible: Vec::new(),
            filter: ListFilter::default(),
            search: SearchField::default(),
            detail: Detail::new(),
            directions: None,
            nav: TableNav::default(),
        }
    }

    fn refilter(&mut self) {
        self.filter.query = self.search.query().to_owned();
        self.visible = self.filter.apply(self.jobs.as_slice());
        self.nav.clamp(self.visible.len());
    }

    fn detail_job(&self) -> Option<&Arc<FieldJob>> {
        let id = self.detail.get()?;
        self.jobs.iter().find(|j| &j.id == id)
    }

    /// Directions for the open job, or the highlighted row.
    fn navigate(&mut self) -> Option<Action> {
        let job = self
            .detail_job()
            .or_else(|| self.visible.get(self.nav.selected()))
            .cloned()?;

        match job.coordinates.directions_url() {
            Ok(url) => {
                self.detail.select(job.id.clone());
                self.directions = Some((job.id.clone(), url.to_string()));
                Some(Action::Notify(Notification::info(format!(
                    "Directions to {}: {url}",
                    job.pole_id
                ))))
            }
            Err(e) => Some(Action::Notify(Notification::error(e.to_string()))),
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, job: &FieldJob) {
        let block = panel(format!(" {} ", job.pole_id), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", job.title), theme::panel_title())),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Status"), theme::label()),
                Span::styled(
                    job.status.to_string(),
                    status_indicator::job_tone(job.status).style(),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Priority"), theme::label()),
                Span::styled(
                    job.priority.to_string(),
                    status_indicator::severity_tone(job.priority).style(),
                ),
            ]),
            field("Location", job.location.clone()),
            field("Coordinates", job.coordinates.to_string()),
            field("Distance", format!("{:.1} km", job.distance_km)),
            field("ETA", format!("{} min", job.eta_minutes)),
            field("Assigned to", job.assigned_to.clone()),
            field("Created", job.created.clone()),
            Line::from(""),
            Line::from(Span::styled("  Equipment", theme::panel_title())),
        ];
        if job.equipment.is_empty() {
            lines.push(Line::from(Span::styled("  none listed", theme::muted())));
        }
        lines.extend(
            job.equipment
                .iter()
                .map(|item| Line::from(Span::styled(format!("  · {item}"), theme::table_row()))),
        );

        lines.push(Line::from(""));
        match &self.directions {
            Some((id, url)) if *id == job.id => {
                lines.push(Line::from(Span::styled("  Directions", theme::panel_title())));
                lines.push(Line::from(Span::styled(
                    format!("  {url}"),
                    theme::value(),
                )));
            }
            _ => lines.push(hints(&[("n", "directions"), ("Esc", "close")])),
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Component for FieldOpsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search.is_editing() {
            if self.search.handle_key(key) == SearchOutcome::Changed {
                self.refilter();
            }
            return Ok(None);
        }

        if self.nav.handle_key(key, self.visible.len()) {
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('/') => self.search.start(),
            KeyCode::Char('f') => {
                self.filter.category = self.filter.category.cycle();
                self.refilter();
            }
            KeyCode::Char('n') => return Ok(self.navigate()),
            KeyCode::Enter => {
                if let Some(job) = self.visible.get(self.nav.selected()) {
                    self.detail.select(job.id.clone());
                }
            }
            KeyCode::Esc => {
                if self.detail.is_open() {
                    self.detail.clear();
                } else if self.search.clear() {
                    self.refilter();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        self.nav.handle_mouse(mouse, self.visible.len());
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::JobsUpdated(jobs) = action {
            self.jobs = Arc::clone(jobs);
            if self.detail_job().is_none() {
                self.detail.clear();
            }
            self.refilter();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let open = self.jobs.iter().filter(|j| j.is_open()).count();
        let block = panel(
            format!(" Field Jobs ({}, {open} open) ", self.jobs.len()),
            self.focused,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (list_area, detail_area) = widgets::split_detail(inner, self.detail.is_open());

        let layout = Layout::vertical([
            Constraint::Length(1), // filter line
            Constraint::Length(1), // search line
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(list_area);

        let filter_line = Line::from(vec![
            Span::styled(" Status: ", theme::label()),
            Span::styled(format!("[{}]", self.filter.category), theme::value()),
        ]);
        frame.render_widget(Paragraph::new(filter_line), layout[0]);
        frame.render_widget(Paragraph::new(self.search.line()), layout[1]);

        if self.visible.is_empty() {
            frame.render_widget(widgets::empty_state("No jobs found"), layout[2]);
        } else {
            let header = Row::new(
                ["", "Pole", "Job", "Priority", "Status", "Distance", "ETA", "Crew"]
                    .into_iter()
                    .map(|h| Cell::from(h).style(theme::table_header())),
            );

            let selected_idx = self.nav.selected();
            let rows: Vec<Row> = self
                .visible
                .iter()
                .enumerate()
                .map(|(i, job)| {
                    let is_selected = i == selected_idx;
                    let prefix = if is_selected { "▸" } else { " " };
                    Row::new(vec![
                        Cell::from(prefix),
                        Cell::from(job.pole_id.clone()).style(theme::fg(theme::SIGNAL)),
                        Cell::from(job.title.clone()),
                        Cell::from(job.priority.to_string()).style(
                            status_indicator::severity_tone(job.priority).style(),
                        ),
                        Cell::from(job.status.to_string())
                            .style(status_indicator::job_tone(job.status).style()),
                        Cell::from(format!("{:.1} km", job.distance_km)),
                        Cell::from(format!("{} min", job.eta_minutes)),
                        Cell::from(job.assigned_to.clone()),
                    ])
                    .style(if is_selected {
                        theme::row_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();

            let widths = [
                Constraint::Length(1),
                Constraint::Length(11),
                Constraint::Min(20),
                Constraint::Length(9),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(14),
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::row_selected());
            let mut state = self.nav.state();
            frame.render_stateful_widget(table, layout[2], &mut state);
        }

        frame.render_widget(
            Paragraph::new(hints(&[
                ("/", "search"),
                ("f", "filter"),
                ("Enter", "detail"),
                ("n", "directions"),
            ])),
            layout[3],
        );

        if let Some(area) = detail_area {
            if let Some(job) = self.detail_job() {
                self.render_detail(frame, area, job);
            }
        }
    }

    fn captures_input(&self) -> bool {
        self.search.is_editing()
    }

    fn consumes_escape(&self) -> bool {
        self.detail.is_open() || !self.search.query().is_empty()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
