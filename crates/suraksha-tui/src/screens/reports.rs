//! Reports screen: the template catalogue, scheduled deliveries and
//! on-demand operations summaries.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use strum::IntoEnumIterator;

use suraksha_core::{
    CitizenReport, DateRange, Device, FieldJob, Incident, OperationsSummary, ReportTemplate,
    ScheduledReport,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::{self, field, hints, panel, status_indicator, sub_tabs};

const TAB_LABELS: [&str; 2] = ["Templates", "Schedules"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportsTab {
    Templates,
    Schedules,
}

fn next_range(range: DateRange) -> DateRange {
    DateRange::iter()
        .skip_while(|r| *r != range)
        .nth(1)
        .or_else(|| DateRange::iter().next())
        .unwrap_or_default()
}

pub struct ReportsScreen {
    focused: bool,
    tab: ReportsTab,
    templates: Arc<Vec<Arc<ReportTemplate>>>,
    schedules: Arc<Vec<Arc<ScheduledReport>>>,
    template_nav: TableNav,
    schedule_nav: TableNav,
    range: DateRange,
    /// Summary for the template last generated, rebuilt on data changes.
    summary: Option<OperationsSummary>,
    devices: Arc<Vec<Arc<Device>>>,
    incidents: Arc<Vec<Arc<Incident>>>,
    jobs: Arc<Vec<Arc<FieldJob>>>,
    citizen: Arc<Vec<Arc<CitizenReport>>>,
}

impl ReportsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            tab: ReportsTab::Templates,
            templates: Arc::new(Vec::new()),
            schedules: Arc::new(Vec::new()),
            template_nav: TableNav::default(),
            schedule_nav: TableNav::default(),
            range: DateRange::default(),
            summary: None,
            devices: Arc::new(Vec::new()),
            incidents: Arc::new(Vec::new()),
            jobs: Arc::new(Vec::new()),
            citizen: Arc::new(Vec::new()),
        }
    }

    fn build_summary(&self, template: &ReportTemplate) -> OperationsSummary {
        OperationsSummary::build(
            template,
            self.range,
            self.devices.iter().map(|d| &**d),
            self.incidents.iter().map(|i| &**i),
            self.jobs.iter().map(|j| &**j),
            self.citizen.iter().map(|r| &**r),
        )
    }

    fn generate(&mut self) {
        if let Some(template) = self.templates.get(self.template_nav.selected()) {
            self.summary = Some(self.build_summary(template));
        }
    }

    /// Rebuild the open summary against the current snapshots.
    fn refresh_summary(&mut self) {
        let Some(open) = &self.summary else {
            return;
        };
        let template = self.templates.iter().find(|t| t.id == open.template);
        self.summary = template.map(|t| self.build_summary(t));
    }

    fn render_templates(&self, frame: &mut Frame, area: Rect) {
        if self.templates.is_empty() {
            frame.render_widget(widgets::empty_state("No report templates"), area);
            return;
        }

        let header = Row::new(
            ["", "Template", "Frequency", "Last generated"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let selected_idx = self.template_nav.selected();
        let rows: Vec<Row> = self
            .templates
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let is_selected = i == selected_idx;
                Row::new(vec![
                    Cell::from(if is_selected { "▸" } else { " " }),
                    Cell::from(t.name.clone()).style(theme::fg(theme::SIGNAL)),
                    Cell::from(t.frequency.clone()),
                    Cell::from(t.last_generated.clone()),
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
            Constraint::Min(28),
            Constraint::Length(22),
            Constraint::Length(20),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::row_selected());
        let mut state = self.template_nav.state();
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_schedules(&self, frame: &mut Frame, area: Rect) {
        if self.schedules.is_empty() {
            frame.render_widget(widgets::empty_state("No scheduled reports"), area);
            return;
        }

        let header = Row::new(
            ["", "Name", "Type", "Schedule", "Recipients", "Status"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let selected_idx = self.schedule_nav.selected();
        let rows: Vec<Row> = self
            .schedules
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let is_selected = i == selected_idx;
                Row::new(vec![
                    Cell::from(if is_selected { "▸" } else { " " }),
                    Cell::from(s.name.clone()).style(theme::fg(theme::SIGNAL)),
                    Cell::from(s.kind.clone()),
                    Cell::from(s.schedule.clone()),
                    Cell::from(s.recipients.join(", ")),
                    Cell::from(s.status.to_string())
                        .style(status_indicator::schedule_tone(s.status).style()),
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
            Constraint::Min(24),
            Constraint::Length(18),
            Constraint::Length(24),
            Constraint::Min(20),
            Constraint::Length(7),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::row_selected());
        let mut state = self.schedule_nav.state();
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_summary(frame: &mut Frame, area: Rect, summary: &OperationsSummary) {
        let block = panel(format!(" {} ", summary.title), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(""),
            field("Range", summary.range.to_string()),
            field("Devices", summary.devices.total().to_string()),
            field("Low battery", summary.low_battery_devices.to_string()),
            field("Active inc.", summary.incidents.active.to_string()),
            field("Resolved inc.", summary.incidents.resolved.to_string()),
            Line::from(""),
            Line::from(Span::styled("  Devices by status", theme::panel_title())),
        ];
        lines.extend(summary.devices.zero_filled().into_iter().map(|(status, n)| {
            Line::from(vec![
                Span::styled(
                    format!("    {:<12}", status.to_string()),
                    status_indicator::device_tone(status).style(),
                ),
                Span::styled(n.to_string(), theme::value()),
            ])
        }));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Field jobs", theme::panel_title())));
        lines.extend(summary.jobs.zero_filled().into_iter().map(|(status, n)| {
            Line::from(vec![
                Span::styled(
                    format!("    {:<12}", status.to_string()),
                    status_indicator::job_tone(status).style(),
                ),
                Span::styled(n.to_string(), theme::value()),
            ])
        }));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Citizen reports", theme::panel_title())));
        lines.extend(summary.citizen_reports.zero_filled().into_iter().map(|(status, n)| {
            Line::from(vec![
                Span::styled(
                    format!("    {:<12}", status.to_string()),
                    status_indicator::report_tone(status).style(),
                ),
                Span::styled(n.to_string(), theme::value()),
            ])
        }));

        lines.push(Line::from(""));
        lines.push(hints(&[("r", "range"), ("Esc", "close")]));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for ReportsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let handled = match self.tab {
            ReportsTab::Templates => self.template_nav.handle_key(key, self.templates.len()),
            ReportsTab::Schedules => self.schedule_nav.handle_key(key, self.schedules.len()),
        };
        if handled {
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('l' | 'h') | KeyCode::Right | KeyCode::Left => {
                self.tab = match self.tab {
                    ReportsTab::Templates => ReportsTab::Schedules,
                    ReportsTab::Schedules => ReportsTab::Templates,
                };
            }
            KeyCode::Enter if self.tab == ReportsTab::Templates => self.generate(),
            KeyCode::Char('r') => {
                self.range = next_range(self.range);
                self.refresh_summary();
            }
            KeyCode::Esc => self.summary = None,
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match self.tab {
            ReportsTab::Templates => self.template_nav.handle_mouse(mouse, self.templates.len()),
            ReportsTab::Schedules => self.schedule_nav.handle_mouse(mouse, self.schedules.len()),
        };
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ReportTemplatesUpdated(templates) => {
                self.templates = Arc::clone(templates);
                self.template_nav.clamp(self.templates.len());
            }
            Action::ScheduledReportsUpdated(schedules) => {
                self.schedules = Arc::clone(schedules);
                self.schedule_nav.clamp(self.schedules.len());
            }
            Action::DevicesUpdated(devices) => self.devices = Arc::clone(devices),
            Action::IncidentsUpdated(incidents) => self.incidents = Arc::clone(incidents),
            Action::JobsUpdated(jobs) => self.jobs = Arc::clone(jobs),
            Action::CitizenReportsUpdated(reports) => self.citizen = Arc::clone(reports),
            _ => return Ok(None),
        }
        self.refresh_summary();
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Reports ", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (list_area, summary_area) = widgets::split_detail(inner, self.summary.is_some());

        let layout = Layout::vertical([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // range line
            Constraint::Min(1),    // table
            Constraint::Length(1), // description or hints
        ])
        .split(list_area);

        let active = match self.tab {
            ReportsTab::Templates => 0,
            ReportsTab::Schedules => 1,
        };
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&TAB_LABELS, active)),
            layout[0],
        );
        let range_line = Line::from(vec![
            Span::styled(" Range: ", theme::label()),
            Span::styled(format!("[{}]", self.range), theme::value()),
        ]);
        frame.render_widget(Paragraph::new(range_line), layout[1]);

        match self.tab {
            ReportsTab::Templates => self.render_templates(frame, layout[2]),
            ReportsTab::Schedules => self.render_schedules(frame, layout[2]),
        }

        let footer = match self.tab {
            ReportsTab::Templates => hints(&[
                ("h/l", "tab"),
                ("Enter", "generate"),
                ("r", "range"),
            ]),
            ReportsTab::Schedules => hints(&[("h/l", "tab"), ("j/k", "select")]),
        };
        frame.render_widget(Paragraph::new(footer), layout[3]);

        if let (Some(area), Some(summary)) = (summary_area, &self.summary) {
            Self::render_summary(frame, area, summary);
        }
    }

    fn consumes_escape(&self) -> bool {
        self.summary.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use suraksha_core::fixtures;

    use super::*;

    fn arcs<T>(items: Vec<T>) -> Arc<Vec<Arc<T>>> {
        Arc::new(items.into_iter().map(Arc::new).collect())
    }

    fn press(screen: &mut ReportsScreen, code: KeyCode) {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn loaded() -> ReportsScreen {
        let mut screen = ReportsScreen::new();
        for action in [
            Action::ReportTemplatesUpdated(arcs(fixtures::report_templates())),
            Action::ScheduledReportsUpdated(arcs(fixtures::scheduled_reports())),
            Action::DevicesUpdated(arcs(fixtures::devices())),
            Action::IncidentsUpdated(arcs(fixtures::incidents())),
            Action::JobsUpdated(arcs(fixtures::field_jobs())),
            Action::CitizenReportsUpdated(arcs(fixtures::citizen_reports())),
        ] {
            screen.update(&action).unwrap();
        }
        screen
    }

    #[test]
    fn enter_generates_summary_for_selected_template() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Enter);

        let summary = screen.summary.as_ref().unwrap();
        assert_eq!(summary.template.as_str(), "incident_summary");
        assert_eq!(summary.range, DateRange::Last30Days);
        assert_eq!(summary.devices.total(), 5);
        assert_eq!(summary.incidents.active, 3);
        assert!(screen.consumes_escape());

        press(&mut screen, KeyCode::Esc);
        assert!(screen.summary.is_none());
    }

    #[test]
    fn range_cycles_and_rebuilds_open_summary() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('j'));
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Char('r'));

        assert_eq!(screen.range, DateRange::Last90Days);
        let summary = screen.summary.as_ref().unwrap();
        assert_eq!(summary.template.as_str(), "device_uptime");
        assert_eq!(summary.range, DateRange::Last90Days);

        press(&mut screen, KeyCode::Char('r'));
        press(&mut screen, KeyCode::Char('r'));
        assert_eq!(screen.range, DateRange::Last7Days);
    }

    #[test]
    fn enter_on_schedules_tab_does_nothing() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('l'));
        press(&mut screen, KeyCode::Enter);
        assert!(screen.summary.is_none());
    }
}
