//! `suraksha-tui`: live terminal dashboard for SurakshaJyoti pole safety.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `suraksha-core`'s [`EntityStream`](suraksha_core::EntityStream). Screens
//! are navigable via number keys (1-9): Dashboard, Live, Devices, Incidents,
//! Field Ops, Citizen, Reports, Analytics and Settings.
//!
//! Logs are written to a file in the platform data directory so they never
//! corrupt the terminal UI. A background data bridge task streams store
//! updates from the monitor into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use suraksha_core::Monitor;

use crate::app::App;

const LOG_FILE_NAME: &str = "suraksha-tui.log";

/// Terminal dashboard for SurakshaJyoti pole-safety monitoring.
#[derive(Parser, Debug)]
#[command(name = "suraksha-tui", version, about)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, env = "SURAKSHA_CONFIG")]
    config: Option<PathBuf>,

    /// Log file path (defaults to suraksha-tui.log in the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Where logs go: `--log-file`, else the data directory, else the temp dir.
fn log_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.log_file {
        return path.clone();
    }
    suraksha_config::data_dir()
        .unwrap_or_else(|_| std::env::temp_dir())
        .join(LOG_FILE_NAME)
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the terminal is in raw mode. The returned guard must be held for the
/// lifetime of the application so buffered logs are flushed.
fn setup_tracing(cli: &Cli) -> Result<WorkerGuard> {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "suraksha_tui={log_level},suraksha_core={log_level}"
        ))
    });

    let log_file = log_path(cli);
    let log_dir = log_file.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(log_dir)
        .wrap_err_with(|| format!("creating log directory {}", log_dir.display()))?;
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new(LOG_FILE_NAME));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(suraksha_config::config_path);
    let config = suraksha_config::load_config_from(&config_path)
        .wrap_err_with(|| format!("loading {}", config_path.display()))?;

    info!(
        config = %config_path.display(),
        live = config.live.enabled,
        interval_ms = config.live.interval_ms,
        "starting suraksha-tui"
    );

    let monitor = Monitor::new(config.monitor_config());
    let mut app = App::new(monitor.clone(), &config, &config_path);
    let result = app.run().await;

    monitor.stop().await;
    monitor.shutdown();
    result
}
