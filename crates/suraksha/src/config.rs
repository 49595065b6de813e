//! CLI configuration: thin wrapper around `suraksha_config` shared types.
//!
//! Resolves the config file from `--config` and folds its `[defaults]`
//! into `GlobalOpts` where no flag was given.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use suraksha_config::{Config, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Config file for this invocation: `--config` / `SURAKSHA_CONFIG`, else
/// the platform default.
pub fn resolve_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(suraksha_config::config_path)
}

/// Load the effective config for this invocation.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&resolve_path(global))?)
}

/// Fill unset `--output` / `--color` from the config's `[defaults]`.
/// Values the CLI does not understand are ignored.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&cfg.defaults.color, true).ok();
    }
}
