//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// How urgent a status word reads, for coloring table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Caution,
    Danger,
    Muted,
    Plain,
}

impl Tone {
    /// Tone for any status, severity or level label in its text form.
    pub fn of(label: &str) -> Self {
        match label {
            "healthy" | "resolved" | "completed" | "closed" | "info" | "low" | "active"
            | "connected" => Self::Good,
            "warning" | "medium" | "in-progress" | "in_progress" | "investigating"
            | "assigned" | "acknowledged" | "under_review" => Self::Caution,
            "critical" | "high" | "new" | "disconnected" => Self::Danger,
            "offline" | "paused" | "submitted" | "pending" | "inactive" => Self::Muted,
            _ => Self::Plain,
        }
    }
}

/// Paints status labels when color is enabled, passes them through
/// otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: &ColorMode) -> Self {
        Self {
            enabled: should_color(mode),
        }
    }

    pub fn status(self, label: &str) -> String {
        if !self.enabled {
            return label.to_owned();
        }
        match Tone::of(label) {
            Tone::Good => label.green().to_string(),
            Tone::Caution => label.yellow().to_string(),
            Tone::Danger => label.red().bold().to_string(),
            Tone::Muted => label.dimmed().to_string(),
            Tone::Plain => label.to_owned(),
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the records via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted string,
/// since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Tell the user a table came out empty. Structured formats stay
/// silent so `[]` remains valid input for scripts.
pub fn note_empty(format: &OutputFormat, quiet: bool, what: &str) {
    if quiet || *format != OutputFormat::Table {
        return;
    }
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "No {what} found");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Pole {
        id: &'static str,
    }

    #[derive(Tabled)]
    struct PoleRow {
        #[tabled(rename = "ID")]
        id: &'static str,
    }

    fn poles() -> Vec<Pole> {
        vec![Pole { id: "KL-001-TVM" }, Pole { id: "KL-002-ERN" }]
    }

    #[test]
    fn plain_lists_one_identifier_per_line() {
        let out = render_list(
            &OutputFormat::Plain,
            &poles(),
            |p| PoleRow { id: p.id },
            |p| p.id.to_owned(),
        )
        .unwrap();
        assert_eq!(out, "KL-001-TVM\nKL-002-ERN");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_list(
            &OutputFormat::JsonCompact,
            &poles(),
            |p| PoleRow { id: p.id },
            |p| p.id.to_owned(),
        )
        .unwrap();
        assert_eq!(out, r#"[{"id":"KL-001-TVM"},{"id":"KL-002-ERN"}]"#);
    }

    #[test]
    fn table_has_renamed_header() {
        let out = render_list(
            &OutputFormat::Table,
            &poles(),
            |p| PoleRow { id: p.id },
            |p| p.id.to_owned(),
        )
        .unwrap();
        assert!(out.contains("ID"));
        assert!(out.contains("KL-002-ERN"));
    }

    #[test]
    fn painter_without_color_passes_labels_through() {
        let painter = Painter::new(&ColorMode::Never);
        assert_eq!(painter.status("critical"), "critical");
    }

    #[test]
    fn tones_follow_urgency() {
        assert_eq!(Tone::of("healthy"), Tone::Good);
        assert_eq!(Tone::of("warning"), Tone::Caution);
        assert_eq!(Tone::of("critical"), Tone::Danger);
        assert_eq!(Tone::of("offline"), Tone::Muted);
        assert_eq!(Tone::of("connected"), Tone::Good);
        assert_eq!(Tone::of("inactive"), Tone::Muted);
        assert_eq!(Tone::of("unheard-of"), Tone::Plain);
    }
}
