//! Screen identifier enum.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Live,      // 2
    Devices,   // 3
    Incidents, // 4
    FieldOps,  // 5
    Citizen,   // 6
    Reports,   // 7
    Analytics, // 8
    Settings,  // 9
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 9] = [
        Self::Dashboard,
        Self::Live,
        Self::Devices,
        Self::Incidents,
        Self::FieldOps,
        Self::Citizen,
        Self::Reports,
        Self::Analytics,
        Self::Settings,
    ];

    /// Numeric key (1-9) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Live => 2,
            Self::Devices => 3,
            Self::Incidents => 4,
            Self::FieldOps => 5,
            Self::Citizen => 6,
            Self::Reports => 7,
            Self::Analytics => 8,
            Self::Settings => 9,
        }
    }

    /// Screen from a numeric key (1-9). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Live => "Live",
            Self::Devices => "Devices",
            Self::Incidents => "Incidents",
            Self::FieldOps => "Field Ops",
            Self::Citizen => "Citizen",
            Self::Reports => "Reports",
            Self::Analytics => "Analytics",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
