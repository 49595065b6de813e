//! Terminal input plus the two clocks the dashboard runs on.
//!
//! A background task merges crossterm input with a status tick (message
//! expiry) and a render tick into one channel the app loop awaits.

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use suraksha_config::TuiSettings;

/// Redraw interval, about 30 frames a second.
const FRAME: Duration = Duration::from_millis(33);

#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Wheel scroll; only delivered when mouse support is on.
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    Render,
}

/// How often the loop ticks and redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub tick: Duration,
    pub frame: Duration,
}

impl Cadence {
    pub fn from_config(tui: &TuiSettings) -> Self {
        Self {
            tick: Duration::from_millis(tui.tick_rate_ms.max(1)),
            frame: FRAME,
        }
    }

    fn interval(period: Duration) -> Interval {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    }
}

/// Keep key presses, wheel scrolls (when `mouse` is on) and resizes.
/// Key releases and repeats, clicks, focus and paste events are dropped.
pub fn translate(event: CrosstermEvent, mouse: bool) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(m)
            if mouse
                && matches!(m.kind, MouseEventKind::ScrollUp | MouseEventKind::ScrollDown) =>
        {
            Some(Event::Mouse(m))
        }
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn new(cadence: Cadence, mouse: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, cancel.clone(), cadence, mouse));
        Self { rx, cancel }
    }

    /// `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump(
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
    cadence: Cadence,
    mouse: bool,
) {
    let mut input = EventStream::new();
    let mut tick = Cadence::interval(cadence.tick);
    let mut frame = Cadence::interval(cadence.frame);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            _ = frame.tick() => Event::Render,
            Some(Ok(raw)) = input.next() => match translate(raw, mouse) {
                Some(event) => event,
                None => continue,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseButton};

    use super::*;

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('p'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn only_key_presses_pass() {
        assert!(matches!(translate(key(KeyEventKind::Press), false), Some(Event::Key(_))));
        assert_eq!(translate(key(KeyEventKind::Release), false), None);
        assert_eq!(translate(key(KeyEventKind::Repeat), false), None);
    }

    #[test]
    fn wheel_needs_mouse_support() {
        assert_eq!(translate(mouse(MouseEventKind::ScrollDown), false), None);
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollUp), true),
            Some(Event::Mouse(_))
        ));
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left)), true),
            None
        );
    }

    #[test]
    fn resize_and_focus() {
        assert_eq!(
            translate(CrosstermEvent::Resize(120, 40), false),
            Some(Event::Resize(120, 40))
        );
        assert_eq!(translate(CrosstermEvent::FocusGained, true), None);
    }

    #[test]
    fn cadence_never_ticks_at_zero() {
        let tui = TuiSettings {
            tick_rate_ms: 0,
            ..TuiSettings::default()
        };
        let cadence = Cadence::from_config(&tui);
        assert_eq!(cadence.tick, Duration::from_millis(1));
        assert_eq!(cadence.frame, FRAME);
    }
}
