//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use suraksha_config::Config;
use suraksha_core::{Command, CommandResult, DEFAULT_USER, Monitor};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Cadence, Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme::{self, Tone};
use crate::tui::Tui;
use crate::widgets;

/// How long a status-bar message stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Whether live updates are flowing.
    live: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Action sender; components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver, drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
    monitor: Monitor,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Active status-bar message with display timestamp.
    notification: Option<(Notification, Instant)>,
    cadence: Cadence,
    mouse: bool,
}

impl App {
    /// Create a new App with every screen.
    pub fn new(monitor: Monitor, config: &Config, config_path: &Path) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(config, config_path).into_iter().collect();

        Self {
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            screens,
            running: true,
            live: false,
            help_visible: false,
            action_tx,
            action_rx,
            monitor,
            data_cancel: CancellationToken::new(),
            notification: None,
            cadence: Cadence::from_config(&config.tui),
            mouse: config.tui.mouse,
        }
    }

    fn focus_initial_screen(&mut self) {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter(self.mouse)?;
        self.focus_initial_screen();

        // Start the monitor and stream its records into the action loop
        {
            let monitor = self.monitor.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(monitor, tx, cancel).await;
            });
        }

        let mut events = EventReader::new(self.cadence, self.mouse);

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Cancel the data bridge; dropping `tui` restores the terminal
        self.data_cancel.cancel();
        events.stop();
        drop(tui);
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C always quits, even mid-edit
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };

        // A focused text field gets every key
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let target = c
                    .to_digit(10)
                    .and_then(|n| u8::try_from(n).ok())
                    .and_then(ScreenId::from_number);
                if let Some(target) = target {
                    return Ok(Some(Action::SwitchScreen(target)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (_, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc closes the screen's panel first, then goes back
            (KeyModifiers::NONE, KeyCode::Esc) if !screen.consumes_escape() => {
                return Ok(Some(Action::GoBack));
            }

            _ => {}
        }

        screen.handle_key_event(key)
    }

    /// Handle mouse events (delegate to active screen).
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    // Unfocus current screen
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    // Focus new screen
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
            }

            Action::Render | Action::Resize(..) => {}

            // Notifications
            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            // Commands
            Action::SubmitComment { incident, text } => {
                self.execute_command(Command::AddComment {
                    incident: incident.clone(),
                    user: DEFAULT_USER.to_owned(),
                    details: text.clone(),
                });
            }

            Action::SubmitReport(draft) => {
                self.execute_command(Command::SubmitReport {
                    draft: draft.clone(),
                });
            }

            Action::ToggleLive => self.toggle_live(),

            // Data goes to every screen so inactive ones stay current
            data if data.is_data() => {
                if let Action::LiveState(live) = data {
                    self.live = *live;
                }
                let mut follow_ups = Vec::new();
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(data)? {
                        follow_ups.push(follow_up);
                    }
                }
                for follow_up in follow_ups {
                    self.action_tx.send(follow_up)?;
                }
            }

            // Everything else goes to the active screen only
            other => {
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    // ── Command execution ─────────────────────────────────────────

    /// Spawn a command execution task. Sends a Notify action on completion.
    fn execute_command(&self, cmd: Command) {
        let monitor = self.monitor.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let notification = match monitor.execute(cmd).await {
                Ok(CommandResult::Incident(incident)) => {
                    info!(incident = %incident.id, "comment added");
                    Notification::success(format!("Comment added to {}", incident.id))
                }
                Ok(CommandResult::CitizenReport(report)) => {
                    info!(report = %report.id, "citizen report submitted");
                    Notification::success(format!("Report {} submitted", report.id))
                }
                Err(e) => {
                    warn!(error = %e, "command execution failed");
                    Notification::error(e.to_string())
                }
            };
            let _ = tx.send(Action::Notify(notification));
        });
    }

    /// Flip live updates. The status bar follows `Monitor::live`, so
    /// only the outcome message is sent from here.
    fn toggle_live(&self) {
        let monitor = self.monitor.clone();
        let tx = self.action_tx.clone();
        let enable = !self.live;
        tokio::spawn(async move {
            let notification = match monitor.set_live(enable).await {
                Ok(()) if enable => Notification::success("Live updates resumed"),
                Ok(()) => Notification::info("Live updates paused"),
                Err(e) => {
                    warn!(error = %e, "could not toggle live updates");
                    Notification::error(format!("Live updates unavailable: {e}"))
                }
            };
            let _ = tx.send(Action::Notify(notification));
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar showing every screen.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    theme::tab(id == self.active_screen),
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar: live indicator, then the current
    /// message or the global key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let live_indicator = if self.live {
            Span::styled("● live", Tone::Safe.style())
        } else {
            Span::styled("○ paused", Tone::Idle.style())
        };

        let tail = match &self.notification {
            Some((notif, _)) => {
                let (tone, icon) = match notif.level {
                    NotificationLevel::Success => (Tone::Safe, "✓"),
                    NotificationLevel::Error => (Tone::Danger, "✗"),
                    NotificationLevel::Info => (Tone::Signal, "·"),
                };
                vec![
                    Span::styled(" │ ", theme::hint()),
                    Span::styled(format!("{icon} {}", notif.message), tone.style()),
                ]
            }
            None => vec![Span::styled(
                " │ ? help  1-9 screens  Tab next  q quit",
                theme::hint(),
            )],
        };

        let mut spans = vec![Span::raw(" "), live_indicator];
        spans.extend(tail);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_area = widgets::centered(area, 64, 37);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::SURFACE)),
            help_area,
        );

        let block = widgets::panel(" Keyboard Shortcuts ", true);
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            [
                Line::from(Span::styled(
                    format!("  {title}"),
                    theme::fg(theme::SIGNAL),
                )),
                Line::from(Span::styled(
                    format!("  {}", "─".repeat(title.chars().count())),
                    theme::hint(),
                )),
            ]
        };
        let key = |keys: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::hint_key()),
                Span::styled(desc, theme::hint()),
            ])
        };

        let mut help_text = vec![Line::from("")];
        help_text.extend(section("Navigation"));
        help_text.extend([
            key("1-9", "Jump to screen"),
            key("Tab", "Next screen (Shift+Tab previous)"),
            key("j/k ↑/↓", "Move up/down"),
            key("g/G", "Top / bottom"),
            key("Ctrl+d/u", "Page down / up"),
            key("Enter", "Open detail / submit"),
            key("Esc", "Close / back"),
            Line::from(""),
        ]);
        help_text.extend(section("Lists"));
        help_text.extend([
            key("/", "Search"),
            key("f", "Cycle status / risk band filter"),
            key("Space", "Select row (Devices)"),
            key("a", "Select all shown (Devices)"),
            key("h/l", "Switch tab (Incidents, Reports)"),
            Line::from(""),
        ]);
        help_text.extend(section("Actions"));
        help_text.extend([
            key("c", "Comment on incident"),
            key("n", "Directions (Field Ops) / new report (Citizen)"),
            key("i", "Edit field (report form)"),
            key("l", "Use my location (report form)"),
            key("r", "Cycle report range"),
            key("p", "Pause / resume live updates (Live)"),
            key("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                        Esc or ? to close",
                theme::hint(),
            )),
        ]);

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
