// ── Runtime monitor configuration ──
//
// How the monitor runs. Built by the CLI/TUI from their config file;
// core never reads config files.

use std::time::Duration;

/// Default live-update period.
pub const DEFAULT_LIVE_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Run the live-update task after `start()`.
    pub live_updates: bool,
    /// Live-update period. Zero disables the task.
    pub live_interval: Duration,
}

impl MonitorConfig {
    /// Config for one-shot use: no background refresh.
    pub fn oneshot() -> Self {
        Self {
            live_updates: false,
            ..Self::default()
        }
    }

    pub(crate) fn live_enabled(&self) -> bool {
        self.live_updates && !self.live_interval.is_zero()
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            live_updates: true,
            live_interval: DEFAULT_LIVE_INTERVAL,
        }
    }
}
