//! The screen contract the app loop drives.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// A dashboard page. The app owns one per [`ScreenId`](crate::screen::ScreenId),
/// feeds every store snapshot to all of them and routes input to the
/// visible one only.
pub trait Component: Send {
    /// A key on the visible screen. May answer with an action.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Wheel scrolling on the visible screen.
    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Data actions reach every screen; the rest only the visible one.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Whether a text field has the keyboard. Global shortcuts are
    /// suspended while this is true.
    fn captures_input(&self) -> bool {
        false
    }

    /// Whether Esc closes something on this screen (a detail panel, a
    /// form) rather than navigating back.
    fn consumes_escape(&self) -> bool {
        false
    }

    /// Highlights the panel border while the screen is visible.
    fn set_focused(&mut self, _focused: bool) {}
}
