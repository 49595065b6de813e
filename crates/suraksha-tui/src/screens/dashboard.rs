//! Dashboard screen: fleet health at a glance.
//!
//! Device status tallies, headline counts and the control-room alert feed.

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use suraksha_core::view::{Tally, tally};
use suraksha_core::{
    Alert, CitizenReport, Device, DeviceStatus, FieldJob, Incident, ReportStatus, Telemetry,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, panel, status_indicator};

/// Width of the longest tally bar.
const BAR_WIDTH: usize = 24;

pub struct DashboardScreen {
    focused: bool,
    devices: Arc<Vec<Arc<Device>>>,
    device_counts: Tally<DeviceStatus>,
    incidents: Arc<Vec<Arc<Incident>>>,
    jobs: Arc<Vec<Arc<FieldJob>>>,
    citizen: Arc<Vec<Arc<CitizenReport>>>,
    telemetry: Arc<Vec<Arc<Telemetry>>>,
    alerts: Arc<Vec<Arc<Alert>>>,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            devices: Arc::new(Vec::new()),
            device_counts: Tally::default(),
            incidents: Arc::new(Vec::new()),
            jobs: Arc::new(Vec::new()),
            citizen: Arc::new(Vec::new()),
            telemetry: Arc::new(Vec::new()),
            alerts: Arc::new(Vec::new()),
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let active_incidents = self
            .incidents
            .iter()
            .filter(|i| i.status.is_active())
            .count();
        let open_jobs = self.jobs.iter().filter(|j| j.is_open()).count();
        let low_battery = self.devices.iter().filter(|d| d.is_low_battery()).count();
        let pending_reports = self
            .citizen
            .iter()
            .filter(|r| r.status != ReportStatus::Resolved)
            .count();

        let cards = [
            ("Devices", self.device_counts.total(), theme::SIGNAL),
            ("Active incidents", active_incidents, theme::DANGER),
            ("Open jobs", open_jobs, theme::CAUTION),
            ("Low battery", low_battery, theme::ALERT),
            ("Citizen reports", pending_reports, theme::FOCUS),
        ];

        let chunks = Layout::horizontal(cards.map(|_| Constraint::Ratio(1, 5))).split(area);
        for ((label, count, color), chunk) in cards.into_iter().zip(chunks.iter()) {
            let block = panel(format!(" {label} "), false);
            let inner = block.inner(*chunk);
            frame.render_widget(block, *chunk);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {count}"),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))),
                inner,
            );
        }
    }

    fn render_device_health(&self, frame: &mut Frame, area: Rect) {
        let block = panel(" Device Health ", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let total = self.device_counts.total().max(1);
        let mut lines = vec![Line::from("")];
        for (status, count) in self.device_counts.zero_filled() {
            let bar = "▮".repeat(count * BAR_WIDTH / total);
            let color = status_indicator::device_tone(status).color();
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} {:<9}", status_indicator::device_char(status), status),
                    Style::default().fg(color),
                ),
                Span::styled(format!("{count:>3}  "), theme::value()),
                Span::styled(bar, Style::default().fg(color)),
            ]));
        }

        let flagged: Vec<&Arc<Telemetry>> =
            self.telemetry.iter().filter(|t| t.alert.is_some()).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Telemetry anomalies", theme::label())));
        if flagged.is_empty() {
            lines.push(Line::from(Span::styled("  none", theme::muted())));
        }
        for reading in flagged {
            if let Some(alert) = &reading.alert {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {} ", status_indicator::device_char(reading.status)),
                        status_indicator::device_tone(reading.status).style(),
                    ),
                    Span::styled(format!("{:<12}", reading.pole_id), theme::value()),
                    Span::styled(alert.kind.clone(), theme::table_row()),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_alerts(&self, frame: &mut Frame, area: Rect) {
        let block = panel(format!(" Alerts ({}) ", self.alerts.len()), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.alerts.is_empty() {
            frame.render_widget(widgets::empty_state("No alerts"), inner);
            return;
        }

        let header = Row::new(
            ["Level", "Message", "Time", "Conf."]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = self
            .alerts
            .iter()
            .map(|alert| {
                Row::new(vec![
                    Cell::from(alert.level.to_string())
                        .style(status_indicator::alert_tone(alert.level).style()),
                    Cell::from(alert.message.clone()),
                    Cell::from(alert.time.clone()),
                    Cell::from(alert.confidence.to_string()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(9),
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(6),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), inner);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DevicesUpdated(devices) => {
                self.devices = Arc::clone(devices);
                self.device_counts = tally(self.devices.iter());
            }
            Action::IncidentsUpdated(incidents) => self.incidents = Arc::clone(incidents),
            Action::JobsUpdated(jobs) => self.jobs = Arc::clone(jobs),
            Action::CitizenReportsUpdated(reports) => self.citizen = Arc::clone(reports),
            Action::TelemetryUpdated(readings) => self.telemetry = Arc::clone(readings),
            Action::AlertsUpdated(alerts) => self.alerts = Arc::clone(alerts),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Length(3), Constraint::Min(8)]).split(area);
        self.render_summary(frame, layout[0]);

        let body = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(layout[1]);
        self.render_device_health(frame, body[0]);
        self.render_alerts(frame, body[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
