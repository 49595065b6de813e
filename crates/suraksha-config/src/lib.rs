//! Shared configuration for the SurakshaJyoti CLI and TUI.
//!
//! One TOML file, layered with figment: built-in defaults, then the
//! file, then `SURAKSHA_` environment variables (`__` separates
//! sections, e.g. `SURAKSHA_LIVE__INTERVAL_MS=500`). Also translates
//! the file into the core's `MonitorConfig` and `ConfiguredLocator`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use suraksha_core::{ConfiguredLocator, MonitorConfig};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "SURAKSHA_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown config key '{key}'")]
    UnknownKey { key: String },

    #[error("no home directory found to hold {what}")]
    NoConfigDir { what: &'static str },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub live: LiveSettings,

    #[serde(default)]
    pub location: LocationSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub system: SystemSettings,

    #[serde(default)]
    pub tui: TuiSettings,
}

/// Output defaults for the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Live-update task settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LiveSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Milliseconds between live updates. 0 disables them.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    2000
}

/// Fixed position used for "use my location".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LocationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Alert delivery channels shown on the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub email: bool,
    #[serde(default = "default_true")]
    pub sms: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default = "default_true")]
    pub whatsapp: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: true,
            push: false,
            whatsapp: true,
        }
    }
}

/// Deployment-wide safety features.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SystemSettings {
    #[serde(default = "default_true")]
    pub auto_isolation: bool,
    #[serde(default = "default_true")]
    pub ai_detection: bool,
    #[serde(default = "default_true")]
    pub real_time_monitoring: bool,
    #[serde(default = "default_true")]
    pub predictive_maintenance: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            auto_isolation: true,
            ai_detection: true,
            real_time_monitoring: true,
            predictive_maintenance: true,
        }
    }
}

/// Terminal dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TuiSettings {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_true")]
    pub mouse: bool,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            mouse: true,
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Monitor settings for a long-running front end.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            live_updates: self.live.enabled,
            live_interval: Duration::from_millis(self.live.interval_ms),
        }
    }

    /// Locator over the configured position, if both halves are set.
    pub fn locator(&self) -> ConfiguredLocator {
        ConfiguredLocator::new(self.location.lat.zip(self.location.lng))
    }
}

// ── Key-path editing ────────────────────────────────────────────────

/// Keys accepted by [`Config::set`].
pub const SETTABLE_KEYS: &[&str] = &[
    "defaults.output",
    "defaults.color",
    "live.enabled",
    "live.interval_ms",
    "location.lat",
    "location.lng",
    "notifications.email",
    "notifications.sms",
    "notifications.push",
    "notifications.whatsapp",
    "system.auto_isolation",
    "system.ai_detection",
    "system.real_time_monitoring",
    "system.predictive_maintenance",
    "tui.tick_rate_ms",
    "tui.mouse",
];

const OUTPUT_FORMATS: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];
const COLOR_MODES: &[&str] = &["auto", "always", "never"];

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, format!("'{value}' is not a boolean"))),
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| invalid(key, format!("'{value}' is not a whole number")))
}

fn parse_degrees(key: &str, value: &str, limit: f64) -> Result<f64, ConfigError> {
    let degrees: f64 = value
        .parse()
        .map_err(|_| invalid(key, format!("'{value}' is not a number")))?;
    if degrees.is_finite() && degrees.abs() <= limit {
        Ok(degrees)
    } else {
        Err(invalid(key, format!("must be between -{limit} and {limit}")))
    }
}

fn one_of(key: &str, value: &str, allowed: &[&str]) -> Result<String, ConfigError> {
    if allowed.contains(&value) {
        Ok(value.to_owned())
    } else {
        Err(invalid(key, format!("expected one of: {}", allowed.join(", "))))
    }
}

impl Config {
    /// Set one value by dotted key path, validating it first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "defaults.output" => self.defaults.output = one_of(key, value, OUTPUT_FORMATS)?,
            "defaults.color" => self.defaults.color = one_of(key, value, COLOR_MODES)?,
            "live.enabled" => self.live.enabled = parse_bool(key, value)?,
            "live.interval_ms" => self.live.interval_ms = parse_u64(key, value)?,
            "location.lat" => self.location.lat = Some(parse_degrees(key, value, 90.0)?),
            "location.lng" => self.location.lng = Some(parse_degrees(key, value, 180.0)?),
            "notifications.email" => self.notifications.email = parse_bool(key, value)?,
            "notifications.sms" => self.notifications.sms = parse_bool(key, value)?,
            "notifications.push" => self.notifications.push = parse_bool(key, value)?,
            "notifications.whatsapp" => self.notifications.whatsapp = parse_bool(key, value)?,
            "system.auto_isolation" => self.system.auto_isolation = parse_bool(key, value)?,
            "system.ai_detection" => self.system.ai_detection = parse_bool(key, value)?,
            "system.real_time_monitoring" => {
                self.system.real_time_monitoring = parse_bool(key, value)?;
            }
            "system.predictive_maintenance" => {
                self.system.predictive_maintenance = parse_bool(key, value)?;
            }
            "tui.tick_rate_ms" => {
                let rate = parse_u64(key, value)?;
                if rate == 0 {
                    return Err(invalid(key, "must be greater than zero"));
                }
                self.tui.tick_rate_ms = rate;
            }
            "tui.mouse" => self.tui.mouse = parse_bool(key, value)?,
            _ => return Err(ConfigError::UnknownKey { key: key.into() }),
        }
        Ok(())
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "suraksha")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("suraksha");
    p
}

/// Directory for log files and other runtime data.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .ok_or(ConfigError::NoConfigDir { what: "log files" })
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from `path` + environment. A missing file
/// yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to pretty TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use suraksha_core::{LocateError, Locator};

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.live.interval_ms, 2000);
        assert!(cfg.live.enabled);
        assert!(!cfg.notifications.push);
        assert!(cfg.notifications.whatsapp);
        assert!(cfg.system.predictive_maintenance);
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[live]\ninterval_ms = 500\n\n[location]\nlat = 9.9312\nlng = 76.2673\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.live.interval_ms, 500);
        assert!(cfg.live.enabled);
        assert_eq!(cfg.monitor_config().live_interval, Duration::from_millis(500));
        assert_eq!(cfg.locator().locate().unwrap().to_string(), "9.931200, 76.267300");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set("notifications.push", "on").unwrap();
        cfg.set("defaults.output", "json").unwrap();
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn locator_needs_both_coordinates() {
        let mut cfg = Config::default();
        cfg.set("location.lat", "8.5241").unwrap();
        assert_eq!(cfg.locator().locate(), Err(LocateError::Unavailable));
    }

    #[test]
    fn set_rejects_bad_values_and_keys() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("defaults.output", "xml"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            cfg.set("location.lat", "123"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            cfg.set("live.enabled", "maybe"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            cfg.set("live.colour", "true"),
            Err(ConfigError::UnknownKey { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn every_settable_key_is_accepted() {
        let sample = |key: &str| match key {
            "defaults.output" => "yaml",
            "defaults.color" => "never",
            "location.lat" | "location.lng" => "10.5",
            k if k.ends_with("_ms") => "100",
            _ => "false",
        };
        let mut cfg = Config::default();
        for key in SETTABLE_KEYS {
            cfg.set(key, sample(key)).unwrap();
        }
    }
}
