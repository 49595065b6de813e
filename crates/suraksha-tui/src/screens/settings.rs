//! Settings screen: read-only view of the loaded configuration, the
//! operator accounts and the connected integrations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use suraksha_config::Config;
use suraksha_core::{Integration, UserAccount};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, field, hints, panel, status_indicator};

pub struct SettingsScreen {
    focused: bool,
    config: Config,
    path: PathBuf,
    users: Arc<Vec<Arc<UserAccount>>>,
    integrations: Arc<Vec<Arc<Integration>>>,
}

impl SettingsScreen {
    pub fn new(config: Config, path: &Path) -> Self {
        Self {
            focused: false,
            config,
            path: path.to_path_buf(),
            users: Arc::new(Vec::new()),
            integrations: Arc::new(Vec::new()),
        }
    }

    fn toggle(label: &str, enabled: bool) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {label:<24} "), theme::label()),
            status_indicator::toggle_span(enabled),
        ])
    }

    fn notification_lines(&self) -> Vec<Line<'static>> {
        let n = &self.config.notifications;
        vec![
            Line::from(""),
            Self::toggle("Email alerts", n.email),
            Self::toggle("SMS alerts", n.sms),
            Self::toggle("Push notifications", n.push),
            Self::toggle("WhatsApp alerts", n.whatsapp),
        ]
    }

    fn system_lines(&self) -> Vec<Line<'static>> {
        let s = &self.config.system;
        vec![
            Line::from(""),
            Self::toggle("Auto isolation", s.auto_isolation),
            Self::toggle("AI hazard detection", s.ai_detection),
            Self::toggle("Real-time monitoring", s.real_time_monitoring),
            Self::toggle("Predictive maintenance", s.predictive_maintenance),
        ]
    }

    fn general_lines(&self) -> Vec<Line<'static>> {
        let location = match (self.config.location.lat, self.config.location.lng) {
            (Some(lat), Some(lng)) => format!("{lat:.6}, {lng:.6}"),
            _ => "not set".to_owned(),
        };
        vec![
            Line::from(""),
            Self::toggle("Live updates", self.config.live.enabled),
            field("Interval", format!("{} ms", self.config.live.interval_ms)),
            field("Location", location),
            field("Output", self.config.defaults.output.clone()),
            field("Color", self.config.defaults.color.clone()),
            field("Tick rate", format!("{} ms", self.config.tui.tick_rate_ms)),
            field("Config file", self.path.display().to_string()),
        ]
    }

    fn render_users(&self, frame: &mut Frame, area: Rect) {
        let block = panel(format!(" Users ({}) ", self.users.len()), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.users.is_empty() {
            frame.render_widget(widgets::empty_state("No users found"), inner);
            return;
        }
        let header = Row::new(
            ["", "Name", "Role", "Email", "Status", "Last login"]
                .into_iter()
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows = self.users.iter().map(|u| {
            Row::new(vec![
                Cell::from(u.initials()).style(theme::value()),
                Cell::from(u.name.clone()),
                Cell::from(u.role.to_string()),
                Cell::from(u.email.clone()),
                Cell::from(u.status.to_string())
                    .style(status_indicator::account_tone(u.status).style()),
                Cell::from(u.last_login.clone()),
            ])
            .style(theme::table_row())
        });
        let widths = [
            Constraint::Length(4),
            Constraint::Length(16),
            Constraint::Length(21),
            Constraint::Min(16),
            Constraint::Length(9),
            Constraint::Length(12),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), inner);
    }

    fn integration_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];
        if self.integrations.is_empty() {
            lines.push(Line::from(Span::styled("  No integrations found", theme::muted())));
        }
        for i in self.integrations.as_slice() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<26} ", i.name), theme::value()),
                status_indicator::integration_span(i.status),
                Span::styled(format!("  synced {}", i.last_sync), theme::muted()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", i.description),
                theme::label(),
            )));
        }
        lines
    }
}

impl Component for SettingsScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::UsersUpdated(users) => self.users = Arc::clone(users),
            Action::IntegrationsUpdated(integrations) => {
                self.integrations = Arc::clone(integrations);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(10),
            Constraint::Min(7),
            Constraint::Length(1),
        ])
        .split(area);
        let columns = Layout::horizontal([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(layout[0]);

        let sections = [
            (" General ", self.general_lines()),
            (" Notifications ", self.notification_lines()),
            (" System ", self.system_lines()),
        ];
        for ((title, lines), chunk) in sections.into_iter().zip(columns.iter()) {
            let block = panel(title, self.focused);
            let inner = block.inner(*chunk);
            frame.render_widget(block, *chunk);
            frame.render_widget(Paragraph::new(lines), inner);
        }

        let accounts = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[1]);
        self.render_users(frame, accounts[0]);
        let block = panel(" Integrations ", false);
        let inner = block.inner(accounts[1]);
        frame.render_widget(block, accounts[1]);
        frame.render_widget(Paragraph::new(self.integration_lines()), inner);

        frame.render_widget(
            Paragraph::new(hints(&[("suraksha config set <key> <value>", "to change")])),
            layout[2],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use suraksha_core::fixtures;

    use super::*;

    fn rendered(screen: &SettingsScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 28)).unwrap();
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
    fn unset_location_is_shown_as_such() {
        let screen = SettingsScreen::new(Config::default(), Path::new("/tmp/suraksha.toml"));
        let text = rendered(&screen);
        assert!(text.contains("not set"));
        assert!(text.contains("/tmp/suraksha.toml"));
    }

    #[test]
    fn configured_location_is_formatted() {
        let mut config = Config::default();
        config.location.lat = Some(9.9312);
        config.location.lng = Some(76.2673);
        let text = rendered(&SettingsScreen::new(config, Path::new("c.toml")));
        assert!(text.contains("9.931200, 76.267300"));
    }

    #[test]
    fn accounts_and_integrations_are_listed() {
        let mut screen = SettingsScreen::new(Config::default(), Path::new("c.toml"));
        assert!(rendered(&screen).contains("No users found"));

        let users = fixtures::users().into_iter().map(Arc::new).collect();
        let integrations = fixtures::integrations().into_iter().map(Arc::new).collect();
        screen.update(&Action::UsersUpdated(Arc::new(users))).unwrap();
        screen
            .update(&Action::IntegrationsUpdated(Arc::new(integrations)))
            .unwrap();

        let text = rendered(&screen);
        assert!(text.contains("Users (4)"));
        assert!(text.contains("Dr. Amit Sharma"));
        assert!(text.contains("inactive"));
        assert!(text.contains("WhatsApp Business API"));
        assert!(text.contains("● connected"));
    }
}
