//! Analytics screen: how the failure-prediction model is doing and
//! which poles it expects to fail next.
//!
//! Top row holds the model metrics, the grid-wide risk distribution and
//! the weighted risk factors. Below sits the prediction table with a
//! risk band filter, search and a detail panel listing the reasons.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};
use strum::IntoEnumIterator;

use suraksha_core::view::{Detail, ListFilter};
use suraksha_core::{Analytics, FailurePrediction, RecordId, RiskBand};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;
use crate::widgets::table_nav::TableNav;
use crate::widgets::text_input::{SearchField, SearchOutcome};
use crate::widgets::{self, field, hints, panel};

/// Width of a full (100%) bar.
const BAR_WIDTH: usize = 20;

fn bar(fraction: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let cells = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(cells), "░".repeat(BAR_WIDTH - cells))
}

pub struct AnalyticsScreen {
    focused: bool,
    analytics: Arc<Analytics>,
    visible: Vec<FailurePrediction>,
    filter: ListFilter<RiskBand>,
    search: SearchField,
    detail: Detail<RecordId>,
    nav: TableNav,
}

impl AnalyticsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            analytics: Arc::new(Analytics::default()),
            visible: Vec::new(),
            filter: ListFilter::default(),
            search: SearchField::default(),
            detail: Detail::new(),
            nav: TableNav::default(),
        }
    }

    fn refilter(&mut self) {
        self.filter.query = self.search.query().to_owned();
        self.visible = self.filter.apply(&self.analytics.predictions);
        self.nav.clamp(self.visible.len());
    }

    fn detail_prediction(&self) -> Option<&FailurePrediction> {
        let id = self.detail.get()?;
        self.analytics.predictions.iter().find(|p| &p.id == id)
    }

    fn metric_lines(&self) -> Vec<Line<'static>> {
        let m = &self.analytics.metrics;
        let pct = |v: f64| format!("{v:.1}%");
        vec![
            Line::from(""),
            field("Accuracy", pct(m.accuracy)),
            field("Precision", pct(m.precision)),
            field("Recall", pct(m.recall)),
            field("False +ve", pct(m.false_positive_rate)),
            Line::from(""),
            field("Last trained", m.last_training.format("%d %b %Y").to_string()),
            field("Data points", m.training_data_points.to_string()),
        ]
    }

    fn distribution_lines(&self) -> Vec<Line<'static>> {
        let d = self.analytics.distribution;
        let total = f64::from(d.total().max(1));
        let mut lines = vec![Line::from("")];
        for band in RiskBand::iter() {
            let count = d.get(band);
            let tone = status_indicator::risk_tone(band);
            lines.push(Line::from(vec![
                Span::styled(format!("  {band:<7}"), tone.style()),
                Span::styled(format!("{count:>5}  "), theme::value()),
                Span::styled(bar(f64::from(count) / total), tone.style()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(field("Poles scored", d.total().to_string()));
        lines
    }

    fn factor_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];
        if self.analytics.risk_factors.is_empty() {
            lines.push(Line::from(Span::styled("  no factors", theme::muted())));
        }
        for f in &self.analytics.risk_factors {
            let tone = status_indicator::risk_tone(f.impact_band());
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<20}", f.factor), theme::label()),
                Span::styled(bar(f.impact.ratio()), tone.style()),
                Span::styled(format!(" {:>4}", f.impact.to_string()), theme::value()),
                Span::styled(
                    format!("  {}", f.trend),
                    status_indicator::risk_tone(f.trend).style(),
                ),
            ]));
        }
        lines
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::horizontal([
            Constraint::Percentage(28),
            Constraint::Percentage(30),
            Constraint::Percentage(42),
        ])
        .split(area);

        let sections = [
            (" Model Performance ", self.metric_lines()),
            (" Risk Distribution ", self.distribution_lines()),
            (" Risk Factors ", self.factor_lines()),
        ];
        for ((title, lines), chunk) in sections.into_iter().zip(columns.iter()) {
            let block = panel(title, false);
            let inner = block.inner(*chunk);
            frame.render_widget(block, *chunk);
            frame.render_widget(Paragraph::new(lines), inner);
        }
    }

    fn render_predictions(&self, frame: &mut Frame, area: Rect) {
        let block = panel(
            format!(" Failure Predictions ({}) ", self.analytics.predictions.len()),
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

        let priority = self
            .analytics
            .predictions
            .iter()
            .filter(|p| p.is_priority())
            .count();
        let filter_line = Line::from(vec![
            Span::styled(" Risk: ", theme::label()),
            Span::styled(format!("[{}]", self.filter.category), theme::value()),
            Span::styled("  Priority: ", theme::label()),
            Span::styled(priority.to_string(), theme::fg(theme::DANGER)),
        ]);
        frame.render_widget(Paragraph::new(filter_line), layout[0]);
        frame.render_widget(Paragraph::new(self.search.line()), layout[1]);

        if self.visible.is_empty() {
            frame.render_widget(widgets::empty_state("No predictions found"), layout[2]);
        } else {
            let header = Row::new(
                ["Pole", "Location", "Risk", "Expected", "Confidence"]
                    .into_iter()
                    .map(|h| Cell::from(h).style(theme::table_header())),
            );
            let selected_idx = self.nav.selected();
            let rows: Vec<Row> = self
                .visible
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let prefix = if i == selected_idx { "▸" } else { " " };
                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", p.pole_id)).style(theme::value()),
                        Cell::from(p.location.clone()),
                        Cell::from(p.risk_score.to_string())
                            .style(status_indicator::risk_tone(p.band()).style()),
                        Cell::from(p.predicted_failure.clone()),
                        Cell::from(p.confidence.to_string()),
                    ])
                    .style(if i == selected_idx {
                        theme::row_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();
            let widths = [
                Constraint::Length(12),
                Constraint::Min(18),
                Constraint::Length(6),
                Constraint::Length(11),
                Constraint::Length(11),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::row_selected());
            let mut state = self.nav.state();
            frame.render_stateful_widget(table, layout[2], &mut state);
        }

        frame.render_widget(
            Paragraph::new(hints(&[("/", "search"), ("f", "risk band"), ("Enter", "detail")])),
            layout[3],
        );

        if let Some(area) = detail_area {
            if let Some(prediction) = self.detail_prediction() {
                Self::render_detail(frame, area, prediction);
            }
        }
    }

    fn render_detail(frame: &mut Frame, area: Rect, p: &FailurePrediction) {
        let block = panel(format!(" {} ", p.pole_id), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tone = status_indicator::risk_tone(p.band());
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {:<14} ", "Risk"), theme::label()),
                Span::styled(format!("{} ({})", p.risk_score, p.band()), tone.style()),
            ]),
            field("Location", p.location.clone()),
            field("Expected", p.predicted_failure.clone()),
            field("Confidence", p.confidence.to_string()),
            Line::from(""),
            Line::from(Span::styled("  Reasons", theme::panel_title())),
        ];
        lines.extend(
            p.reasons
                .iter()
                .map(|r| Line::from(Span::styled(format!("  · {r}"), theme::table_row()))),
        );
        lines.push(Line::from(""));
        let advice = if p.is_priority() {
            Span::styled("  Schedule priority maintenance", theme::fg(theme::DANGER))
        } else {
            Span::styled("  Schedule inspection", theme::fg(theme::CAUTION))
        };
        lines.push(Line::from(advice));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Component for AnalyticsScreen {
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
            KeyCode::Enter => {
                if let Some(p) = self.visible.get(self.nav.selected()) {
                    self.detail.select(p.id.clone());
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
        if let Action::AnalyticsUpdated(analytics) = action {
            self.analytics = Arc::clone(analytics);
            if self.detail_prediction().is_none() {
                self.detail.clear();
            }
            self.refilter();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Length(10), Constraint::Min(8)]).split(area);
        self.render_overview(frame, layout[0]);
        self.render_predictions(frame, layout[1]);
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

    fn press(screen: &mut AnalyticsScreen, code: KeyCode) {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn loaded() -> AnalyticsScreen {
        let mut screen = AnalyticsScreen::new();
        screen
            .update(&Action::AnalyticsUpdated(Arc::new(fixtures::analytics())))
            .unwrap();
        screen
    }

    fn rendered(screen: &AnalyticsScreen) -> String {
        let backend = ratatui::backend::TestBackend::new(140, 30);
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

    fn poles(screen: &AnalyticsScreen) -> Vec<&str> {
        screen.visible.iter().map(|p| p.pole_id.as_str()).collect()
    }

    #[test]
    fn bars_scale_with_fraction() {
        assert_eq!(bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(1.0), "█".repeat(BAR_WIDTH));
        assert_eq!(bar(0.5).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(bar(2.0), "█".repeat(BAR_WIDTH));
    }

    #[test]
    fn risk_band_filter_cycles() {
        let mut screen = loaded();
        assert_eq!(poles(&screen), vec!["KL-008-KLM", "KL-015-TSR", "KL-023-EKM"]);

        press(&mut screen, KeyCode::Char('f'));
        assert_eq!(screen.filter.category.to_string(), "low");
        assert!(screen.visible.is_empty());

        press(&mut screen, KeyCode::Char('f'));
        assert_eq!(screen.filter.category.to_string(), "medium");
        assert_eq!(poles(&screen), vec!["KL-023-EKM"]);

        press(&mut screen, KeyCode::Char('f'));
        assert_eq!(poles(&screen), vec!["KL-008-KLM", "KL-015-TSR"]);
    }

    #[test]
    fn search_narrows_by_location() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Char('/'));
        for c in "thrissur".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        assert_eq!(poles(&screen), vec!["KL-015-TSR"]);
    }

    #[test]
    fn detail_lists_reasons_and_advice() {
        let mut screen = loaded();
        press(&mut screen, KeyCode::Enter);
        assert!(screen.consumes_escape());

        let text = rendered(&screen);
        assert!(text.contains("High vibration detected"));
        assert!(text.contains("Schedule priority maintenance"));

        press(&mut screen, KeyCode::Esc);
        assert!(!screen.detail.is_open());
    }

    #[test]
    fn overview_shows_metrics_and_factors() {
        let text = rendered(&loaded());
        assert!(text.contains("94.2%"));
        assert!(text.contains("15 Jan 2024"));
        assert!(text.contains("Vibration Levels"));
        assert!(text.contains("1247"));
    }

    #[test]
    fn empty_analytics_shows_placeholder() {
        let screen = AnalyticsScreen::new();
        assert!(rendered(&screen).contains("No predictions found"));
    }
}
