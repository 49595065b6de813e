//! Row selection shared by the list screens: j/k, g/G, Ctrl+d/u and
//! the scroll wheel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::widgets::TableState;

const PAGE: usize = 10;

/// Selected row of a table whose length changes under it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableNav {
    state: TableState,
}

impl TableNav {
    pub fn selected(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    /// Select `idx`, clamped to the last of `len` rows.
    pub fn select(&mut self, idx: usize, len: usize) {
        self.state.select(Some(idx.min(len.saturating_sub(1))));
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.select(self.selected(), len);
    }

    fn step(&mut self, down: bool, by: usize, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.selected();
        let next = if down {
            current.saturating_add(by)
        } else {
            current.saturating_sub(by)
        };
        self.select(next, len);
    }

    /// Apply a navigation key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent, len: usize) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.step(true, 1, len),
            KeyCode::Char('k') | KeyCode::Up => self.step(false, 1, len),
            KeyCode::Char('g') | KeyCode::Home => self.select(0, len),
            KeyCode::Char('G') | KeyCode::End => self.select(len.saturating_sub(1), len),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.step(true, PAGE, len);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.step(false, PAGE, len);
            }
            KeyCode::PageDown => self.step(true, PAGE, len),
            KeyCode::PageUp => self.step(false, PAGE, len),
            _ => return false,
        }
        true
    }

    /// Scroll-wheel movement. Returns whether the event was consumed.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, len: usize) -> bool {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.step(true, 1, len),
            MouseEventKind::ScrollUp => self.step(false, 1, len),
            _ => return false,
        }
        true
    }

    /// Copy of the table state for `render_stateful_widget`.
    pub fn state(&self) -> TableState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn moves_within_bounds() {
        let mut nav = TableNav::default();
        nav.handle_key(press(KeyCode::Char('k')), 5);
        assert_eq!(nav.selected(), 0);

        nav.handle_key(press(KeyCode::Char('G')), 5);
        assert_eq!(nav.selected(), 4);

        nav.handle_key(press(KeyCode::Char('j')), 5);
        assert_eq!(nav.selected(), 4);

        nav.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), 5);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn clamp_follows_a_shrinking_list() {
        let mut nav = TableNav::default();
        nav.select(7, 8);
        nav.clamp(3);
        assert_eq!(nav.selected(), 2);
        nav.clamp(0);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn other_keys_pass_through() {
        let mut nav = TableNav::default();
        assert!(!nav.handle_key(press(KeyCode::Char('x')), 3));
        assert!(nav.handle_key(press(KeyCode::Down), 3));
    }
}
