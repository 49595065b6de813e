//! Reusable widget helpers shared by the screens.

pub mod status_indicator;
pub mod sub_tabs;
pub mod table_nav;
pub mod text_input;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::theme;

/// Rounded panel block with the shared title and border styles.
pub fn panel(title: impl Into<String>, focused: bool) -> Block<'static> {
    Block::default()
        .title(title.into())
        .title_style(theme::panel_title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
}

/// A `label  value` line for detail panels.
pub fn field<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {label:<14} "), theme::label()),
        Span::styled(value.into(), theme::value()),
    ])
}

/// Key hint line from `(key, description)` pairs.
pub fn hints<'a>(pairs: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(pairs.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (key, desc) in pairs {
        spans.push(Span::styled(format!(" {key} "), theme::hint_key()));
        spans.push(Span::styled(*desc, theme::hint()));
    }
    Line::from(spans)
}

/// Centered rect of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

/// Placeholder shown in place of an empty table.
pub fn empty_state(message: impl Into<String>) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.into(), theme::muted())),
    ])
    .alignment(Alignment::Center)
}

/// Two-column split with the detail panel on the right, or the whole
/// area when no detail is open.
pub fn split_detail(area: Rect, detail_open: bool) -> (Rect, Option<Rect>) {
    if detail_open {
        let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    }
}
