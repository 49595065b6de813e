//! Citizen screen: reports filed by the public, and the form for
//! filing a new one.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Clear, Paragraph, Row, Table, Wrap};
use tui_input::Input;

use suraksha_core::view::{Detail, ListFilter};
use suraksha_core::{CitizenReport, ConfiguredLocator, RecordId, ReportDraft, ReportStatus};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;
use crate::widgets::table_nav::TableNav;
use crate::widgets::text_input::{self, SearchField, SearchOutcome};
use crate::widgets::{self, field, hints, panel};

// ── Report form ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Title,
    Location,
    Description,
    Phone,
    Photos,
}

impl FormField {
    const ALL: [Self; 5] = [
        Self::Title,
        Self::Location,
        Self::Description,
        Self::Phone,
        Self::Photos,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Title => "Title *",
            Self::Location => "Location *",
            Self::Description => "Description",
            Self::Phone => "Phone",
            Self::Photos => "Photos",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The new-report form. `draft` holds the committed values; `editing`
/// holds the text of the field being typed into.
#[derive(Debug, Default)]
struct ReportForm {
    draft: ReportDraft,
    field: Option<FormField>,
    editing: Option<Input>,
}

impl ReportForm {
    fn current(&self) -> FormField {
        self.field.unwrap_or(FormField::Title)
    }

    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.draft.title.clone(),
            FormField::Location => self.draft.location.clone(),
            FormField::Description => self.draft.description.clone(),
            FormField::Phone => self.draft.phone.clone(),
            FormField::Photos => self.draft.photos.join(", "),
        }
    }

    fn begin_edit(&mut self) {
        self.editing = Some(Input::new(self.value(self.current())));
    }

    /// Write the edited text back into the draft.
    fn commit_edit(&mut self) {
        let Some(input) = self.editing.take() else {
            return;
        };
        let value = input.value().to_owned();
        match self.current() {
            FormField::Title => self.draft.title = value,
            FormField::Location => self.draft.location = value,
            FormField::Description => self.draft.description = value,
            FormField::Phone => self.draft.phone = value,
            FormField::Photos => {
                self.draft.photos.clear();
                self.draft.attach(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|path| !path.is_empty()),
                );
            }
        }
    }

    fn move_to(&mut self, field: FormField) {
        self.field = Some(field);
    }

    /// Required fields present, or the message to show.
    fn check(&self) -> Result<(), &'static str> {
        if self.draft.title.trim().is_empty() {
            return Err("report title is required");
        }
        if self.draft.location.trim().is_empty() {
            return Err("report location is required");
        }
        Ok(())
    }
}

// ── Screen ───────────────────────────────────────────────────────────

pub struct CitizenScreen {
    focused: bool,
    reports: Arc<Vec<Arc<CitizenReport>>>,
    visible: Vec<Arc<CitizenReport>>,
    filter: ListFilter<ReportStatus>,
    search: SearchField,
    detail: Detail<RecordId>,
    form: Option<ReportForm>,
    locator: ConfiguredLocator,
    nav: TableNav,
}

impl CitizenScreen {
    pub fn new(locator: ConfiguredLocator) -> Self {
        Self {
            focused: false,
            reports: Arc::new(Vec::new()),
            visible: Vec::new(),
            filter: ListFilter::default(),
            search: SearchField::default(),
            detail: Detail::new(),
            form: None,
            locator,
            nav: TableNav::default(),
        }
    }

    fn refilter(&mut self) {
        self.filter.query = self.search.query().to_owned();
        self.visible = self.filter.apply(self.reports.as_slice());
        self.nav.clamp(self.visible.len());
    }

    fn detail_report(&self) -> Option<&Arc<CitizenReport>> {
        let id = self.detail.get()?;
        self.reports.iter().find(|r| &r.id == id)
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let form = self.form.as_mut()?;

        if let Some(input) = form.editing.as_mut() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => form.commit_edit(),
                KeyCode::Tab => {
                    form.commit_edit();
                    form.move_to(form.current().next());
                }
                _ => {
                    text_input::apply_key(input, key);
                }
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => self.form = None,
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                form.move_to(form.current().next());
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                form.move_to(form.current().prev());
            }
            KeyCode::Char('i' | 'e') => form.begin_edit(),
            KeyCode::Char('l') => {
                return match form.draft.use_location(&self.locator) {
                    Ok(_) => {
                        form.move_to(FormField::Location);
                        None
                    }
                    Err(e) => Some(Action::Notify(Notification::error(e.to_string()))),
                };
            }
            KeyCode::Enter => {
                if let Err(message) = form.check() {
                    return Some(Action::Notify(Notification::error(message)));
                }
                let draft = std::mem::take(&mut form.draft);
                self.form = None;
                return Some(Action::SubmitReport(draft));
            }
            _ => {}
        }
        None
    }

    fn render_form(frame: &mut Frame, area: Rect, form: &ReportForm) {
        let area = widgets::centered(area, 72, 16);
        frame.render_widget(Clear, area);
        let block = panel(" New Hazard Report ", true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let current = form.current();
        let mut lines = vec![Line::from("")];
        for f in FormField::ALL {
            let line = match &form.editing {
                Some(input) if f == current => text_input::input_line(f.label(), input, true),
                _ => {
                    let marker = if f == current { "▸" } else { " " };
                    let label_style = if f == current {
                        Style::default()
                            .fg(theme::FOCUS)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        theme::label()
                    };
                    Line::from(vec![
                        Span::styled(format!("{marker} {:<14} ", f.label()), label_style),
                        Span::styled(form.value(f), theme::value()),
                    ])
                }
            };
            lines.push(line);
        }
        lines.push(Line::from(""));
        lines.push(if form.editing.is_some() {
            hints(&[("Enter", "done"), ("Tab", "next field"), ("Esc", "done")])
        } else {
            hints(&[
                ("j/k", "field"),
                ("i", "edit"),
                ("l", "my location"),
                ("Enter", "submit"),
                ("Esc", "cancel"),
            ])
        });

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_detail(frame: &mut Frame, area: Rect, report: &CitizenReport) {
        let block = panel(format!(" {} ", report.id), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", report.title), theme::panel_title())),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Status"), theme::label()),
                Span::styled(
                    report.status.to_string(),
                    status_indicator::report_tone(report.status).style(),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Priority"), theme::label()),
                Span::styled(
                    report.priority.to_string(),
                    status_indicator::severity_tone(report.priority).style(),
                ),
            ]),
            field("Location", report.location.clone()),
            field("Submitted", report.submitted.to_string()),
            field(
                "Photos",
                if report.photos.is_empty() {
                    "none".to_owned()
                } else {
                    report.photos.join(", ")
                },
            ),
        ];
        if let Some(description) = &report.description {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("  {description}"), theme::table_row())));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Response", theme::panel_title())));
        lines.push(match &report.response {
            Some(response) => Line::from(Span::styled(format!("  {response}"), theme::value())),
            None => Line::from(Span::styled("  Awaiting response", theme::muted())),
        });

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Component for CitizenScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.is_some() {
            return Ok(self.handle_form_key(key));
        }

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
            KeyCode::Char('n') => self.form = Some(ReportForm::default()),
            KeyCode::Enter => {
                if let Some(report) = self.visible.get(self.nav.selected()) {
                    self.detail.select(report.id.clone());
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
        if self.form.is_none() {
            self.nav.handle_mouse(mouse, self.visible.len());
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::CitizenReportsUpdated(reports) = action {
            self.reports = Arc::clone(reports);
            if self.detail_report().is_none() {
                self.detail.clear();
            }
            self.refilter();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(
            format!(" Citizen Reports ({}) ", self.reports.len()),
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
            frame.render_widget(widgets::empty_state("No reports found"), layout[2]);
        } else {
            let header = Row::new(
                ["", "ID", "Title", "Location", "Priority", "Status", "Submitted"]
                    .into_iter()
                    .map(|h| Cell::from(h).style(theme::table_header())),
            );

            let selected_idx = self.nav.selected();
            let rows: Vec<Row> = self
                .visible
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let is_selected = i == selected_idx;
                    let prefix = if is_selected { "▸" } else { " " };
                    Row::new(vec![
                        Cell::from(prefix),
                        Cell::from(r.id.to_string()).style(theme::fg(theme::SIGNAL)),
                        Cell::from(r.title.clone()),
                        Cell::from(r.location.clone()),
                        Cell::from(r.priority.to_string()).style(
                            status_indicator::severity_tone(r.priority).style(),
                        ),
                        Cell::from(r.status.to_string())
                            .style(status_indicator::report_tone(r.status).style()),
                        Cell::from(r.submitted.to_string()),
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
                Constraint::Length(12),
                Constraint::Min(20),
                Constraint::Min(18),
                Constraint::Length(9),
                Constraint::Length(13),
                Constraint::Length(11),
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
                ("n", "new report"),
            ])),
            layout[3],
        );

        if let Some(area) = detail_area {
            if let Some(report) = self.detail_report() {
                Self::render_detail(frame, area, report);
            }
        }

        if let Some(form) = &self.form {
            Self::render_form(frame, area, form);
        }
    }

    fn captures_input(&self) -> bool {
        self.form.is_some() || self.search.is_editing()
    }

    fn consumes_escape(&self) -> bool {
        self.form.is_some() || self.detail.is_open() || !self.search.query().is_empty()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use suraksha_core::fixtures;

    use super::*;
    use crate::action::NotificationLevel;

    fn press(screen: &mut CitizenScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_text(screen: &mut CitizenScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn loaded(locator: ConfiguredLocator) -> CitizenScreen {
        let mut screen = CitizenScreen::new(locator);
        let reports: Vec<Arc<CitizenReport>> = fixtures::citizen_reports()
            .into_iter()
            .map(Arc::new)
            .collect();
        screen
            .update(&Action::CitizenReportsUpdated(Arc::new(reports)))
            .unwrap();
        screen
    }

    #[test]
    fn status_filter_narrows_reports() {
        let mut screen = loaded(ConfiguredLocator::default());
        press(&mut screen, KeyCode::Char('f'));
        assert_eq!(screen.filter.category.to_string(), "submitted");
        assert!(screen.visible.is_empty());

        press(&mut screen, KeyCode::Char('f'));
        let ids: Vec<&str> = screen.visible.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["CR-2024-003"]);
    }

    #[test]
    fn form_submits_filled_draft() {
        let mut screen = loaded(ConfiguredLocator::new(Some((9.9312, 76.2673))));
        press(&mut screen, KeyCode::Char('n'));
        assert!(screen.captures_input());

        press(&mut screen, KeyCode::Char('i'));
        type_text(&mut screen, "Leaning pole");
        press(&mut screen, KeyCode::Enter);

        assert!(press(&mut screen, KeyCode::Char('l')).is_none());

        for _ in 0..3 {
            press(&mut screen, KeyCode::Char('j'));
        }
        press(&mut screen, KeyCode::Char('e'));
        type_text(&mut screen, "/tmp/a.jpg, b.png");
        press(&mut screen, KeyCode::Enter);

        match press(&mut screen, KeyCode::Enter) {
            Some(Action::SubmitReport(draft)) => {
                assert_eq!(draft.title, "Leaning pole");
                assert_eq!(draft.location, "9.931200, 76.267300");
                assert_eq!(draft.photos, vec!["a.jpg", "b.png"]);
            }
            other => panic!("expected SubmitReport, got {other:?}"),
        }
        assert!(screen.form.is_none());
    }

    #[test]
    fn submit_without_location_keeps_form_open() {
        let mut screen = loaded(ConfiguredLocator::default());
        press(&mut screen, KeyCode::Char('n'));
        press(&mut screen, KeyCode::Char('i'));
        type_text(&mut screen, "Sparks");
        press(&mut screen, KeyCode::Tab);

        match press(&mut screen, KeyCode::Enter) {
            Some(Action::Notify(n)) => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert_eq!(n.message, "report location is required");
            }
            other => panic!("expected Notify, got {other:?}"),
        }
        let form = screen.form.as_ref().unwrap();
        assert_eq!(form.draft.title, "Sparks");
        assert_eq!(form.current(), FormField::Location);
    }

    #[test]
    fn location_lookup_failure_is_reported() {
        let mut screen = loaded(ConfiguredLocator::default());
        press(&mut screen, KeyCode::Char('n'));
        match press(&mut screen, KeyCode::Char('l')) {
            Some(Action::Notify(n)) => assert_eq!(n.level, NotificationLevel::Error),
            other => panic!("expected Notify, got {other:?}"),
        }
        assert!(screen.form.as_ref().unwrap().draft.location.is_empty());
    }

    #[test]
    fn esc_cancels_form() {
        let mut screen = loaded(ConfiguredLocator::default());
        press(&mut screen, KeyCode::Char('n'));
        assert!(screen.consumes_escape());
        press(&mut screen, KeyCode::Esc);
        assert!(screen.form.is_none());
        assert!(!screen.captures_input());
    }
}
