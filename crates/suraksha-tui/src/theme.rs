//! Safety signal palette: every colour on screen says how safe a pole,
//! a job or a report is, plus a few neutrals for chrome.

use ratatui::style::{Color, Modifier, Style};

// ── Signal colours ──

pub const SAFE: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const CAUTION: Color = Color::Rgb(250, 204, 21); // #facc15
pub const ALERT: Color = Color::Rgb(251, 146, 60); // #fb923c
pub const DANGER: Color = Color::Rgb(248, 81, 73); // #f85149
pub const SIGNAL: Color = Color::Rgb(56, 189, 248); // #38bdf8
pub const FOCUS: Color = Color::Rgb(245, 158, 11); // #f59e0b

// ── Neutrals ──

pub const TEXT: Color = Color::Rgb(203, 213, 225); // #cbd5e1
pub const MUTED: Color = Color::Rgb(100, 116, 139); // #64748b
pub const SURFACE_RAISED: Color = Color::Rgb(30, 41, 59); // #1e293b
pub const SURFACE: Color = Color::Rgb(15, 23, 42); // #0f172a

/// How alarming something is. Status vocabularies map onto a tone, and
/// the tone picks the colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Safe,
    Caution,
    Alert,
    Danger,
    /// In motion or informational: assigned, submitted, in progress.
    Signal,
    /// Not reporting or switched off.
    Idle,
}

impl Tone {
    pub const fn color(self) -> Color {
        match self {
            Self::Safe => SAFE,
            Self::Caution => CAUTION,
            Self::Alert => ALERT,
            Self::Danger => DANGER,
            Self::Signal => SIGNAL,
            Self::Idle => MUTED,
        }
    }

    pub fn style(self) -> Style {
        fg(self.color())
    }
}

pub fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

fn bold(color: Color) -> Style {
    fg(color).add_modifier(Modifier::BOLD)
}

pub fn panel_title() -> Style {
    bold(SIGNAL)
}

pub fn border(focused: bool) -> Style {
    fg(if focused { FOCUS } else { MUTED })
}

pub fn table_header() -> Style {
    bold(SIGNAL).add_modifier(Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    fg(TEXT)
}

pub fn row_selected() -> Style {
    bold(FOCUS).bg(SURFACE_RAISED)
}

pub fn tab(active: bool) -> Style {
    if active { bold(FOCUS) } else { fg(TEXT) }
}

/// Description half of a key hint.
pub fn hint() -> Style {
    fg(MUTED)
}

/// Key half of a key hint.
pub fn hint_key() -> Style {
    bold(SIGNAL)
}

pub fn label() -> Style {
    fg(TEXT)
}

pub fn value() -> Style {
    fg(SIGNAL)
}

/// Placeholders such as "No devices found".
pub fn muted() -> Style {
    fg(MUTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tones_are_distinct() {
        let tones = [
            Tone::Safe,
            Tone::Caution,
            Tone::Alert,
            Tone::Danger,
            Tone::Signal,
            Tone::Idle,
        ];
        for (i, a) in tones.iter().enumerate() {
            for b in &tones[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a:?} and {b:?} share a colour");
            }
        }
    }

    #[test]
    fn focus_changes_border_and_tab() {
        assert_eq!(border(true).fg, Some(FOCUS));
        assert_eq!(border(false).fg, Some(MUTED));
        assert!(tab(true).add_modifier.contains(Modifier::BOLD));
        assert_eq!(tab(false).fg, Some(TEXT));
    }
}
