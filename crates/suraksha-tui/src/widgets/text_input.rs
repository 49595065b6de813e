//! Single-line text fields backed by `tui-input`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use tui_input::{Input, InputRequest};

use crate::theme;

/// Translate an editing key into a `tui-input` request.
fn request_for(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let request = match key.code {
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(request)
}

/// Apply an editing key to `input`. Returns whether the key was consumed.
pub fn apply_key(input: &mut Input, key: KeyEvent) -> bool {
    match request_for(key) {
        Some(request) => {
            input.handle(request);
            true
        }
        None => false,
    }
}

/// `label value` with a block cursor when `active`.
pub fn input_line<'a>(label: &'a str, input: &Input, active: bool) -> Line<'a> {
    let label_style = if active {
        Style::default()
            .fg(theme::FOCUS)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::label()
    };
    let mut spans = vec![Span::styled(format!("  {label:<14} "), label_style)];

    if active {
        let value = input.value();
        let split = value
            .char_indices()
            .nth(input.cursor())
            .map_or(value.len(), |(i, _)| i);
        let (before, after) = value.split_at(split);
        let mut rest = after.chars();
        let under = rest.next().map_or_else(|| " ".to_owned(), String::from);
        spans.push(Span::styled(before.to_owned(), theme::value()));
        spans.push(Span::styled(
            under,
            Style::default().fg(theme::SURFACE).bg(theme::SIGNAL),
        ));
        spans.push(Span::styled(rest.as_str().to_owned(), theme::value()));
    } else {
        spans.push(Span::styled(input.value().to_owned(), theme::value()));
    }

    Line::from(spans)
}

// ── Search field ─────────────────────────────────────────────────────

/// What a key did to a [`SearchField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query text changed.
    Changed,
    /// Editing ended; the query stays applied.
    Done,
    /// The key was not for the field.
    Ignored,
}

/// The `/` search box above a list.
#[derive(Debug, Default)]
pub struct SearchField {
    input: Input,
    editing: bool,
}

impl SearchField {
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub fn start(&mut self) {
        self.editing = true;
    }

    /// Drop the query. Returns whether there was one.
    pub fn clear(&mut self) -> bool {
        let had_query = !self.input.value().is_empty();
        self.input.reset();
        self.editing = false;
        had_query
    }

    /// Handle a key while editing. Enter keeps the query, Esc drops it.
    pub fn handle_key(&mut self, key: KeyEvent) -> SearchOutcome {
        match key.code {
            KeyCode::Enter => {
                self.editing = false;
                SearchOutcome::Done
            }
            KeyCode::Esc => {
                self.clear();
                SearchOutcome::Changed
            }
            _ if apply_key(&mut self.input, key) => SearchOutcome::Changed,
            _ => SearchOutcome::Ignored,
        }
    }

    /// `Search: query` line; blank when idle without a query.
    pub fn line(&self) -> Line<'static> {
        if !self.editing && self.input.value().is_empty() {
            return Line::from(Span::styled("  / search", theme::hint()));
        }
        input_line("Search:", &self.input, self.editing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &[KeyEvent]) -> Input {
        let mut input = Input::default();
        for key in keys {
            apply_key(&mut input, *key);
        }
        input
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace() {
        let input = typed(&[
            press(KeyCode::Char('k')),
            press(KeyCode::Char('o')),
            press(KeyCode::Char('x')),
            press(KeyCode::Backspace),
            press(KeyCode::Char('c')),
        ]);
        assert_eq!(input.value(), "koc");
    }

    #[test]
    fn home_inserts_at_start() {
        let input = typed(&[
            press(KeyCode::Char('2')),
            press(KeyCode::Home),
            press(KeyCode::Char('1')),
        ]);
        assert_eq!(input.value(), "12");
    }

    #[test]
    fn ctrl_u_clears_the_line() {
        let input = typed(&[
            press(KeyCode::Char('a')),
            press(KeyCode::Char('b')),
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        ]);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn navigation_keys_are_not_consumed() {
        let mut input = Input::default();
        assert!(!apply_key(&mut input, press(KeyCode::Enter)));
        assert!(!apply_key(&mut input, press(KeyCode::Esc)));
        assert!(!apply_key(&mut input, press(KeyCode::Tab)));
    }

    #[test]
    fn search_enter_keeps_and_esc_drops_the_query() {
        let mut search = SearchField::default();
        search.start();
        assert_eq!(search.handle_key(press(KeyCode::Char('k'))), SearchOutcome::Changed);
        assert_eq!(search.handle_key(press(KeyCode::Enter)), SearchOutcome::Done);
        assert!(!search.is_editing());
        assert_eq!(search.query(), "k");

        search.start();
        assert_eq!(search.handle_key(press(KeyCode::Esc)), SearchOutcome::Changed);
        assert_eq!(search.query(), "");
        assert!(!search.is_editing());
    }
}
