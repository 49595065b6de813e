//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use suraksha_config::ConfigError;
use suraksha_core::{CoreError, LocateError};

/// Process exit codes.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const VALIDATION: i32 = 5;
    pub const CONFIG: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(suraksha::not_found),
        help("Run: suraksha {list_command} to see what is on file")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(suraksha::validation))]
    Validation { field: String, reason: String },

    #[error("Current location is unavailable")]
    #[diagnostic(
        code(suraksha::location_unavailable),
        help(
            "Set a position with:\n  \
             suraksha config set location.lat <degrees>\n  \
             suraksha config set location.lng <degrees>\n\
             or pass --location instead of --here."
        )
    )]
    LocationUnavailable,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists")]
    #[diagnostic(
        code(suraksha::config_exists),
        help("Use --force to overwrite it.\nPath: {path}")
    )]
    ConfigExists { path: String },

    #[error("Unknown config key '{key}'")]
    #[diagnostic(code(suraksha::unknown_key), help("Supported keys:\n{supported}"))]
    UnknownKey { key: String, supported: String },

    #[error(transparent)]
    #[diagnostic(code(suraksha::config))]
    Config(ConfigError),

    // ── Runtime ──────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(suraksha::core))]
    Core(CoreError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(suraksha::render))]
    Render(String),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: list_command_for(entity_type).into(),
                resource_type: entity_type.into(),
                identifier,
            },
            CoreError::InvalidValue {
                field,
                value,
                expected,
            } => Self::Validation {
                field: field.into(),
                reason: format!("'{value}' is not one of: {expected}"),
            },
            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Location(LocateError::Unavailable) => Self::LocationUnavailable,
            CoreError::Location(err @ LocateError::OutOfRange { .. }) => Self::Validation {
                field: "location".into(),
                reason: err.to_string(),
            },
            other => Self::Core(other),
        }
    }
}

impl From<LocateError> for CliError {
    fn from(err: LocateError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownKey { key } => Self::UnknownKey {
                key,
                supported: suraksha_config::SETTABLE_KEYS.join("\n"),
            },
            other => Self::Config(other),
        }
    }
}

fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "Device" => "devices list",
        "Incident" => "incidents list --tab all",
        "Field job" => "jobs list",
        "Citizen report" => "citizen list",
        "Telemetry" => "live list",
        "Report template" => "reports templates",
        "Prediction" => "analytics predictions",
        _ => "--help",
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::LocationUnavailable => exit_code::VALIDATION,
            Self::ConfigExists { .. } | Self::UnknownKey { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::Core(_) | Self::Io(_) | Self::Render(_) => exit_code::GENERAL,
        }
    }
}
