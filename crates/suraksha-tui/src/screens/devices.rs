//! Devices screen: the pole registry with search, status filter, bulk
//! selection and a detail panel.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use suraksha_core::view::{Detail, ListFilter, Selection};
use suraksha_core::{Device, DeviceStatus, RecordId};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;
use crate::widgets::table_nav::TableNav;
use crate::widgets::text_input::{SearchField, SearchOutcome};
use crate::widgets::{self, field, hints, panel};

pub struct DevicesScreen {
    focused: bool,
    devices: Arc<Vec<Arc<Device>>>,
    /// Devices passing the current filter, in registry order.
    visible: Vec<Arc<Device>>,
    filter: ListFilter<DeviceStatus>,
    search: SearchField,
    selection: Selection<RecordId>,
    detail: Detail<RecordId>,
    nav: TableNav,
}

impl DevicesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            devices: Arc::new(Vec::new()),
            visible: Vec::new(),
            filter: ListFilter::default(),
            search: SearchField::default(),
            selection: Selection::new(),
            detail: Detail::new(),
            nav: TableNav::default(),
        }
    }

    fn refilter(&mut self) {
        self.filter.query = self.search.query().to_owned();
        self.visible = self.filter.apply(self.devices.as_slice());
        self.nav.clamp(self.visible.len());
    }

    fn selected_device(&self) -> Option<&Arc<Device>> {
        self.visible.get(self.nav.selected())
    }

    fn detail_device(&self) -> Option<&Arc<Device>> {
        let id = self.detail.get()?;
        self.devices.iter().find(|d| &d.id == id)
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, device: &Device) {
        let block = panel(format!(" {} ", device.pole_id), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let battery_style = if device.is_low_battery() {
            theme::fg(theme::DANGER)
        } else {
            theme::value()
        };
        let firmware_note = if device.has_current_firmware() {
            "current"
        } else {
            "update due"
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Status"), theme::label()),
                status_indicator::device_span(device.status),
            ]),
            field("Region", device.region.clone()),
            field("Location", device.location.clone()),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Battery"), theme::label()),
                Span::styled(device.battery.to_string(), battery_style),
            ]),
            field("Firmware", format!("{} ({firmware_note})", device.firmware)),
            field("Installed", device.installed.to_string()),
            field("Last seen", device.last_seen.clone()),
            Line::from(""),
            Line::from(Span::styled("  Last message", theme::label())),
            Line::from(Span::styled(
                format!("  {}", device.last_message),
                theme::table_row(),
            )),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DevicesScreen {
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
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_device().map(|d| d.id.clone()) {
                    self.selection.toggle(id);
                }
            }
            KeyCode::Char('a') => {
                let shown: Vec<RecordId> = self.visible.iter().map(|d| d.id.clone()).collect();
                self.selection.toggle_all(shown);
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_device().map(|d| d.id.clone()) {
                    self.detail.select(id);
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
        if let Action::DevicesUpdated(devices) = action {
            self.devices = Arc::clone(devices);
            self.selection
                .retain_present(self.devices.iter().map(|d| &d.id));
            if self.detail_device().is_none() {
                self.detail.clear();
            }
            self.refilter();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Devices ({}) ", self.devices.len());
        let block = panel(title, self.focused);
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
            Span::styled("  Selected: ", theme::label()),
            Span::styled(self.selection.len().to_string(), theme::fg(theme::ALERT)),
            Span::styled(
                format!("  Showing {} of {}", self.visible.len(), self.devices.len()),
                theme::label(),
            ),
        ]);
        frame.render_widget(Paragraph::new(filter_line), layout[0]);
        frame.render_widget(Paragraph::new(self.search.line()), layout[1]);

        if self.visible.is_empty() {
            frame.render_widget(widgets::empty_state("No devices found"), layout[2]);
        } else {
            let header = Row::new(
                ["", "", "Pole", "Region", "Location", "Battery", "Firmware", "Last seen"]
                    .into_iter()
                    .map(|h| Cell::from(h).style(theme::table_header())),
            );

            let selected_idx = self.nav.selected();
            let rows: Vec<Row> = self
                .visible
                .iter()
                .enumerate()
                .map(|(i, dev)| {
                    let is_selected = i == selected_idx;
                    let prefix = if is_selected { "▸" } else { " " };
                    let mark = if self.selection.contains(&dev.id) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    let battery_color = if dev.is_low_battery() {
                        theme::DANGER
                    } else {
                        theme::TEXT
                    };
                    let row_style = if is_selected {
                        theme::row_selected()
                    } else {
                        theme::table_row()
                    };

                    Row::new(vec![
                        Cell::from(mark).style(theme::fg(theme::ALERT)),
                        Cell::from(format!(
                            "{prefix}{}",
                            status_indicator::device_char(dev.status)
                        ))
                        .style(status_indicator::device_tone(dev.status).style()),
                        Cell::from(dev.pole_id.clone()).style(
                            Style::default().fg(theme::SIGNAL).add_modifier(
                                if is_selected {
                                    Modifier::BOLD
                                } else {
                                    Modifier::empty()
                                },
                            ),
                        ),
                        Cell::from(dev.region.clone()),
                        Cell::from(dev.location.clone()),
                        Cell::from(dev.battery.to_string())
                            .style(Style::default().fg(battery_color)),
                        Cell::from(dev.firmware.clone()),
                        Cell::from(dev.last_seen.clone()),
                    ])
                    .style(row_style)
                })
                .collect();

            let widths = [
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Min(16),
                Constraint::Length(8),
                Constraint::Length(9),
                Constraint::Length(12),
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
                ("Space", "select"),
                ("a", "all"),
                ("Enter", "detail"),
            ])),
            layout[3],
        );

        if let Some(area) = detail_area {
            if let Some(device) = self.detail_device() {
                self.render_detail(frame, area, device);
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
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use suraksha_core::fixtures;

    use super::*;

    fn press(screen: &mut DevicesScreen, code: KeyCode) {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn type_text(screen: &mut DevicesScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn loaded() -> DevicesScreen {
        let mut screen = DevicesScreen::new();
        let devices: Vec<Arc<Device>> = fixtures::devices().into_iter().map(Arc::new).collect();
        screen
            .update(&Action::DevicesUpdated(Arc::new(devices)))
            .unwrap();
        screen
    }

    fn shown(screen: &DevicesScreen) -> Vec<&str> {
        screen.visible.iter().map(|d| d.pole_id.as_str()).collect()
    }

    fn rendered(screen: &DevicesScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                screen.render(frame, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn search_narrows_the_list() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('/'));
        assert!(screen.captures_input());
        type_text(&mut screen, "ernakulam");
        press(&mut screen, KeyCode::Enter);

        assert!(!screen.captures_input());
        assert_eq!(shown(&screen), vec!["KL-003-KCH"]);
    }

    #[test]
    fn status_filter_cycles_from_all() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('f'));
        assert_eq!(screen.filter.category.to_string(), "healthy");
        assert!(
            screen
                .visible
                .iter()
                .all(|d| d.status == DeviceStatus::Healthy)
        );
    }

    #[test]
    fn select_all_twice_clears() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('a'));
        assert_eq!(screen.selection.len(), screen.visible.len());
        press(&mut screen, KeyCode::Char('a'));
        assert!(screen.selection.is_empty());
    }

    #[test]
    fn space_toggles_the_highlighted_row() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('j'));
        press(&mut screen, KeyCode::Char(' '));
        let second = screen.visible[1].id.clone();
        assert!(screen.selection.contains(&second));
        press(&mut screen, KeyCode::Char(' '));
        assert!(!screen.selection.contains(&second));
    }

    #[test]
    fn enter_opens_and_esc_closes_detail() {
        let mut screen = loaded();
        assert!(!screen.consumes_escape());
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.detail_device().map(|d| d.pole_id.as_str()),
            Some(screen.visible[0].pole_id.as_str())
        );
        assert!(screen.consumes_escape());
        press(&mut screen, KeyCode::Esc);
        assert!(!screen.detail.is_open());
    }

    #[test]
    fn empty_filter_renders_placeholder() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('/'));
        type_text(&mut screen, "no such pole");
        assert!(screen.visible.is_empty());
        assert!(rendered(&screen).contains("No devices found"));
    }
}
