//! Live screen: latest sensor readings per pole, refreshed by the
//! live-update task.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Gauge, Paragraph, Row, Table};

use suraksha_core::model::LOW_BATTERY_THRESHOLD;
use suraksha_core::view::{Detail, ListFilter};
use suraksha_core::{DeviceStatus, RecordId, Telemetry};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;
use crate::widgets::table_nav::TableNav;
use crate::widgets::text_input::{SearchField, SearchOutcome};
use crate::widgets::{self, field, hints, panel};

pub struct LiveScreen {
    focused: bool,
    live: bool,
    readings: Arc<Vec<Arc<Telemetry>>>,
    visible: Vec<Arc<Telemetry>>,
    filter: ListFilter<DeviceStatus>,
    search: SearchField,
    detail: Detail<RecordId>,
    nav: TableNav,
}

impl LiveScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            live: false,
            readings: Arc::new(Vec::new()),
            visible: Vec::new(),
            filter: ListFilter::default(),
            search: SearchField::default(),
            detail: Detail::new(),
            nav: TableNav::default(),
        }
    }

    fn refilter(&mut self) {
        self.filter.query = self.search.query().to_owned();
        self.visible = self.filter.apply(self.readings.as_slice());
        self.nav.clamp(self.visible.len());
    }

    fn detail_reading(&self) -> Option<&Arc<Telemetry>> {
        let id = self.detail.get()?;
        self.readings.iter().find(|t| &t.id == id)
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, reading: &Telemetry) {
        let block = panel(format!(" {} ", reading.pole_id), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Length(1), // battery gauge
            Constraint::Min(1),    // readings
        ])
        .split(inner);

        let battery_color = if reading.battery.get() < LOW_BATTERY_THRESHOLD {
            theme::DANGER
        } else {
            theme::SAFE
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(battery_color).bg(theme::SURFACE_RAISED))
            .ratio(reading.battery.ratio())
            .label(format!(
                "battery {}{}",
                reading.battery,
                if reading.solar_charging { " ☀ charging" } else { "" }
            ));
        frame.render_widget(gauge, layout[1]);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Status"), theme::label()),
                status_indicator::device_span(reading.status),
            ]),
            field("Location", reading.location.clone()),
            field("Coordinates", reading.coordinates.to_string()),
            field("Temperature", format!("{:.1} °C", reading.temperature_c)),
            field("Current", format!("{:.1} A", reading.current_a)),
            field("Voltage", format!("{:.0} V", reading.voltage_v)),
            field("Vibration", format!("{:.2} g", reading.vibration_g)),
            field("Updated", reading.last_update.clone()),
        ];

        if let Some(alert) = &reading.alert {
            let confidence = alert
                .ai_confidence
                .map(|c| format!(" ({c} confidence)"))
                .unwrap_or_default();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  ⚠ {}{confidence}", alert.kind),
                status_indicator::device_tone(reading.status).style(),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", alert.details),
                theme::table_row(),
            )));
        }

        frame.render_widget(Paragraph::new(lines), layout[2]);
    }
}

impl Component for LiveScreen {
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
            KeyCode::Char('p') => return Ok(Some(Action::ToggleLive)),
            KeyCode::Char('f') => {
                self.filter.category = self.filter.category.cycle();
                self.refilter();
            }
            KeyCode::Enter => {
                if let Some(reading) = self.visible.get(self.nav.selected()) {
                    self.detail.select(reading.id.clone());
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
        match action {
            Action::TelemetryUpdated(readings) => {
                self.readings = Arc::clone(readings);
                if self.detail_reading().is_none() {
                    self.detail.clear();
                }
                self.refilter();
            }
            Action::LiveState(live) => self.live = *live,
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let indicator = if self.live { "● live" } else { "○ paused" };
        let block = panel(
            format!(" Live Telemetry ({})  {indicator} ", self.readings.len()),
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

        let alerting = self.readings.iter().filter(|t| t.alert.is_some()).count();
        let filter_line = Line::from(vec![
            Span::styled(" Status: ", theme::label()),
            Span::styled(format!("[{}]", self.filter.category), theme::value()),
            Span::styled("  Alerts: ", theme::label()),
            Span::styled(alerting.to_string(), theme::fg(theme::DANGER)),
        ]);
        frame.render_widget(Paragraph::new(filter_line), layout[0]);
        frame.render_widget(Paragraph::new(self.search.line()), layout[1]);

        if self.visible.is_empty() {
            frame.render_widget(widgets::empty_state("No telemetry found"), layout[2]);
        } else {
            let header = Row::new(
                ["", "Pole", "Location", "Battery", "Temp", "Current", "Voltage", "Vib.", "Alert"]
                    .into_iter()
                    .map(|h| Cell::from(h).style(theme::table_header())),
            );

            let selected_idx = self.nav.selected();
            let rows: Vec<Row> = self
                .visible
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let is_selected = i == selected_idx;
                    let prefix = if is_selected { "▸" } else { " " };
                    let alert = t.alert.as_ref().map_or("─", |a| a.kind.as_str());
                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", status_indicator::device_char(t.status)))
                            .style(status_indicator::device_tone(t.status).style()),
                        Cell::from(t.pole_id.clone()).style(theme::fg(theme::SIGNAL)),
                        Cell::from(t.location.clone()),
                        Cell::from(t.battery.to_string()),
                        Cell::from(format!("{:.1}°C", t.temperature_c)),
                        Cell::from(format!("{:.1} A", t.current_a)),
                        Cell::from(format!("{:.0} V", t.voltage_v)),
                        Cell::from(format!("{:.2}g", t.vibration_g)),
                        Cell::from(alert.to_owned()).style(theme::fg(theme::ALERT)),
                    ])
                    .style(if is_selected {
                        theme::row_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();

            let widths = [
                Constraint::Length(3),
                Constraint::Length(12),
                Constraint::Min(14),
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Length(16),
            ];

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::row_selected());
            let mut state = self.nav.state();
            frame.render_stateful_widget(table, layout[2], &mut state);
        }

        let toggle = if self.live { "pause" } else { "resume" };
        frame.render_widget(
            Paragraph::new(hints(&[
                ("/", "search"),
                ("f", "filter"),
                ("Enter", "detail"),
                ("p", toggle),
            ])),
            layout[3],
        );

        if let Some(area) = detail_area {
            if let Some(reading) = self.detail_reading() {
                self.render_detail(frame, area, reading);
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use suraksha_core::fixtures;

    use super::*;

    fn press(screen: &mut LiveScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn rendered(screen: &LiveScreen) -> String {
        let backend = ratatui::backend::TestBackend::new(120, 16);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                screen.render(frame, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn p_asks_the_app_to_toggle_live_updates() {
        let mut screen = LiveScreen::new();
        assert!(matches!(press(&mut screen, KeyCode::Char('p')), Some(Action::ToggleLive)));
    }

    #[test]
    fn p_is_typed_into_the_search_while_editing() {
        let mut screen = LiveScreen::new();
        press(&mut screen, KeyCode::Char('/'));
        assert!(press(&mut screen, KeyCode::Char('p')).is_none());
        assert_eq!(screen.search.query(), "p");
    }

    #[test]
    fn indicator_follows_live_state() {
        let mut screen = LiveScreen::new();
        let readings: Vec<Arc<Telemetry>> =
            fixtures::telemetry_readings().into_iter().map(Arc::new).collect();
        screen
            .update(&Action::TelemetryUpdated(Arc::new(readings)))
            .unwrap();

        assert!(rendered(&screen).contains("○ paused"));
        assert!(rendered(&screen).contains("resume"));

        screen.update(&Action::LiveState(true)).unwrap();
        let text = rendered(&screen);
        assert!(text.contains("● live"));
        assert!(!text.contains("resume"));
    }
}
