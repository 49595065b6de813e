//! Incidents screen: Active / Resolved / All tabs, severity filter,
//! detail with evidence and action log, and operator comments.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};
use strum::IntoEnumIterator;
use tui_input::Input;

use suraksha_core::view::{Detail, IncidentTab, ListFilter};
use suraksha_core::{Incident, RecordId, Severity};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::table_nav::TableNav;
use crate::widgets::text_input::{self, SearchField, SearchOutcome};
use crate::widgets::{self, field, hints, panel, status_indicator, sub_tabs};

const TAB_LABELS: [&str; 3] = ["Active", "Resolved", "All"];

/// A comment being typed for one incident.
struct CommentDraft {
    incident: RecordId,
    input: Input,
}

pub struct IncidentsScreen {
    focused: bool,
    incidents: Arc<Vec<Arc<Incident>>>,
    visible: Vec<Arc<Incident>>,
    tab: IncidentTab,
    filter: ListFilter<Severity>,
    search: SearchField,
    detail: Detail<RecordId>,
    comment: Option<CommentDraft>,
    nav: TableNav,
}

impl IncidentsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            incidents: Arc::new(Vec::new()),
            visible: Vec::new(),
            tab: IncidentTab::default(),
            filter: ListFilter::default(),
            search: SearchField::default(),
            detail: Detail::new(),
            comment: None,
            nav: TableNav::default(),
        }
    }

    fn refilter(&mut self) {
        self.filter.query = self.search.query().to_owned();
        self.visible = self
            .filter
            .apply(self.incidents.as_slice())
            .into_iter()
            .filter(|i| self.tab.includes(i.status))
            .collect();
        self.nav.clamp(self.visible.len());
    }

    fn tab_index(&self) -> usize {
        IncidentTab::iter().position(|t| t == self.tab).unwrap_or(0)
    }

    fn switch_tab(&mut self, forward: bool) {
        let len = TAB_LABELS.len();
        let idx = if forward {
            (self.tab_index() + 1) % len
        } else {
            (self.tab_index() + len - 1) % len
        };
        self.tab = IncidentTab::iter().nth(idx).unwrap_or_default();
        self.refilter();
    }

    fn detail_incident(&self) -> Option<&Arc<Incident>> {
        let id = self.detail.get()?;
        self.incidents.iter().find(|i| &i.id == id)
    }

    /// Incident the `c` key comments on: the open detail, else the
    /// highlighted row.
    fn comment_target(&self) -> Option<RecordId> {
        self.detail
            .get()
            .cloned()
            .or_else(|| self.visible.get(self.nav.selected()).map(|i| i.id.clone()))
    }

    fn handle_comment_key(&mut self, key: KeyEvent) -> Option<Action> {
        let draft = self.comment.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.comment = None;
                None
            }
            KeyCode::Enter => {
                let draft = self.comment.take()?;
                Some(Action::SubmitComment {
                    incident: draft.incident,
                    text: draft.input.value().to_owned(),
                })
            }
            _ => {
                text_input::apply_key(&mut draft.input, key);
                None
            }
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, incident: &Incident) {
        let block = panel(format!(" {} · {} ", incident.id, incident.pole_id), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).split(inner);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Severity"), theme::label()),
                Span::styled(
                    incident.severity.to_string(),
                    status_indicator::severity_tone(incident.severity).style(),
                ),
                Span::styled("   ", theme::label()),
                Span::styled(
                    incident.status.to_string(),
                    status_indicator::incident_tone(incident.status).style(),
                ),
            ]),
            field("Type", incident.kind.to_string()),
            field("Location", incident.location.clone()),
            field("Reported by", incident.reported_by.clone()),
            field(
                "Assigned to",
                incident.assigned_to.clone().unwrap_or_else(|| "─".into()),
            ),
            field(
                "AI confidence",
                incident
                    .ai_confidence
                    .map_or_else(|| "─".into(), |c| c.to_string()),
            ),
            field("Created", incident.created_at.clone()),
            field("Updated", incident.updated_at.clone()),
            Line::from(""),
            Line::from(Span::styled("  Evidence", theme::panel_title())),
        ];
        if incident.evidence.is_empty() {
            lines.push(Line::from(Span::styled("  none", theme::muted())));
        }
        lines.extend(incident.evidence.iter().map(|file| {
            Line::from(Span::styled(format!("  · {file}"), theme::table_row()))
        }));

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Action log", theme::panel_title())));
        if incident.actions.is_empty() {
            lines.push(Line::from(Span::styled("  No actions yet", theme::muted())));
        }
        for entry in &incident.actions {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", entry.timestamp), theme::muted()),
                Span::styled(format!("{:<13}", entry.kind.to_string()), theme::value()),
                Span::styled(entry.user.clone(), theme::fg(theme::ALERT)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("            {}", entry.details),
                theme::table_row(),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), layout[0]);

        let footer = match &self.comment {
            Some(draft) if draft.incident == incident.id => {
                text_input::input_line("Comment:", &draft.input, true)
            }
            _ => hints(&[("c", "comment"), ("Esc", "close")]),
        };
        frame.render_widget(Paragraph::new(footer), layout[1]);
    }
}

impl Component for IncidentsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.comment.is_some() {
            return Ok(self.handle_comment_key(key));
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
            KeyCode::Char('l') | KeyCode::Right => self.switch_tab(true),
            KeyCode::Char('h') | KeyCode::Left => self.switch_tab(false),
            KeyCode::Char('c') => {
                if let Some(incident) = self.comment_target() {
                    self.detail.select(incident.clone());
                    self.comment = Some(CommentDraft {
                        incident,
                        input: Input::default(),
                    });
                }
            }
            KeyCode::Enter => {
                if let Some(incident) = self.visible.get(self.nav.selected()) {
                    self.detail.select(incident.id.clone());
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
        if let Action::IncidentsUpdated(incidents) = action {
            self.incidents = Arc::clone(incidents);
            if self.detail_incident().is_none() {
                self.detail.clear();
            }
            self.refilter();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = panel(format!(" Incidents ({}) ", self.incidents.len()), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (list_area, detail_area) = widgets::split_detail(inner, self.detail.is_open());

        let layout = Layout::vertical([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // filter line
            Constraint::Length(1), // search line
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(list_area);

        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&TAB_LABELS, self.tab_index())),
            layout[0],
        );
        let filter_line = Line::from(vec![
            Span::styled(" Severity: ", theme::label()),
            Span::styled(format!("[{}]", self.filter.category), theme::value()),
        ]);
        frame.render_widget(Paragraph::new(filter_line), layout[1]);
        frame.render_widget(Paragraph::new(self.search.line()), layout[2]);

        if self.visible.is_empty() {
            frame.render_widget(widgets::empty_state("No incidents found"), layout[3]);
        } else {
            let header = Row::new(
                ["", "ID", "Pole", "Type", "Severity", "Status", "Location"]
                    .into_iter()
                    .map(|h| Cell::from(h).style(theme::table_header())),
            );

            let selected_idx = self.nav.selected();
            let rows: Vec<Row> = self
                .visible
                .iter()
                .enumerate()
                .map(|(i, inc)| {
                    let is_selected = i == selected_idx;
                    let prefix = if is_selected { "▸" } else { " " };
                    Row::new(vec![
                        Cell::from(prefix),
                        Cell::from(inc.id.to_string()).style(theme::fg(theme::SIGNAL)),
                        Cell::from(inc.pole_id.clone()),
                        Cell::from(inc.kind.to_string()),
                        Cell::from(inc.severity.to_string()).style(
                            status_indicator::severity_tone(inc.severity).style(),
                        ),
                        Cell::from(inc.status.to_string()).style(
                            status_indicator::incident_tone(inc.status).style(),
                        ),
                        Cell::from(inc.location.clone()),
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
                Constraint::Length(13),
                Constraint::Length(11),
                Constraint::Length(20),
                Constraint::Length(9),
                Constraint::Length(13),
                Constraint::Min(16),
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::row_selected());
            let mut state = self.nav.state();
            frame.render_stateful_widget(table, layout[3], &mut state);
        }

        frame.render_widget(
            Paragraph::new(hints(&[
                ("h/l", "tab"),
                ("/", "search"),
                ("f", "severity"),
                ("Enter", "detail"),
                ("c", "comment"),
            ])),
            layout[4],
        );

        if let Some(area) = detail_area {
            if let Some(incident) = self.detail_incident() {
                self.render_detail(frame, area, incident);
            }
        }
    }

    fn captures_input(&self) -> bool {
        self.comment.is_some() || self.search.is_editing()
    }

    fn consumes_escape(&self) -> bool {
        self.detail.is_open() || !self.search.query().is_empty()
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

    fn press(screen: &mut IncidentsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn loaded() -> IncidentsScreen {
        let mut screen = IncidentsScreen::new();
        let incidents: Vec<Arc<Incident>> =
            fixtures::incidents().into_iter().map(Arc::new).collect();
        screen
            .update(&Action::IncidentsUpdated(Arc::new(incidents)))
            .unwrap();
        screen
    }

    #[test]
    fn tabs_split_active_and_resolved() {
        let mut screen = loaded();
        assert_eq!(screen.visible.len(), 3);

        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.tab, IncidentTab::Resolved);
        assert!(screen.visible.is_empty());

        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.tab, IncidentTab::All);
        assert_eq!(screen.visible.len(), 3);

        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.tab, IncidentTab::Active);
    }

    #[test]
    fn comment_submits_typed_text() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('c'));
        assert!(screen.captures_input());
        assert!(screen.detail.is_open());

        for c in "on site".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        let action = press(&mut screen, KeyCode::Enter);

        match action {
            Some(Action::SubmitComment { incident, text }) => {
                assert_eq!(incident.as_str(), "INC-2024-001");
                assert_eq!(text, "on site");
            }
            other => panic!("expected SubmitComment, got {other:?}"),
        }
        assert!(!screen.captures_input());
    }

    #[test]
    fn esc_abandons_the_comment() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('c'));
        press(&mut screen, KeyCode::Char('x'));
        assert!(press(&mut screen, KeyCode::Esc).is_none());
        assert!(screen.comment.is_none());
        assert!(screen.detail.is_open());
    }

    #[test]
    fn severity_filter_applies_within_tab() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('f'));
        assert_eq!(screen.filter.category.to_string(), "critical");
        let ids: Vec<&str> = screen.visible.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["INC-2024-001"]);
    }
}
