//! Clap derive structures for the `suraksha` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// suraksha -- pole-safety monitoring from the command line
#[derive(Debug, Parser)]
#[command(
    name = "suraksha",
    version,
    about = "Monitor SurakshaJyoti pole-safety devices from the command line",
    long_about = "Inspect devices, live telemetry, incidents, field jobs and citizen\n\
        reports of a SurakshaJyoti deployment, and generate operations reports.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "SURAKSHA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, env = "SURAKSHA_COLOR", global = true)]
    pub color: Option<ColorMode>,

    /// Disable color output (same as --color never)
    #[arg(long, global = true, conflicts_with = "color")]
    pub no_color: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Config file to use instead of the platform default
    #[arg(long, env = "SURAKSHA_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    /// Effective output format once config defaults are applied.
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    /// Effective color mode once config defaults are applied.
    pub fn color_mode(&self) -> ColorMode {
        if self.no_color {
            return ColorMode::Never;
        }
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect the device registry
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Inspect live telemetry from pole sensors
    Live(LiveArgs),

    /// Inspect and comment on safety incidents
    #[command(alias = "inc", alias = "i")]
    Incidents(IncidentsArgs),

    /// Inspect field jobs and get directions
    #[command(alias = "job")]
    Jobs(JobsArgs),

    /// Inspect and file citizen hazard reports
    Citizen(CitizenArgs),

    /// Show dashboard alerts
    Alerts(AlertsArgs),

    /// Report templates, schedules and generation
    Reports(ReportsArgs),

    /// Failure-prediction model metrics, risk factors and predictions
    #[command(alias = "ai")]
    Analytics(AnalyticsArgs),

    /// List operator accounts
    Users(UsersArgs),

    /// List external integrations and their sync state
    Integrations(IntegrationsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Search and status filter shared by list commands.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Case-insensitive text to look for in the searchable fields
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Only show records with this status ("all" for every status)
    #[arg(long, default_value = "all")]
    pub status: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices (search: pole id, location, region)
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Get device details
    Get {
        /// Device ID or pole code (e.g. KL-003-KCH)
        device: String,
    },

    /// Count devices per status
    Counts,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LIVE TELEMETRY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LiveArgs {
    #[command(subcommand)]
    pub command: LiveCommand,
}

#[derive(Debug, Subcommand)]
pub enum LiveCommand {
    /// List latest readings (search: pole id, location)
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Get one reading with sensor values and any alert
    Get {
        /// Reading ID or pole code (e.g. KL-007-KLM)
        pole: String,
    },

    /// List readings in critical or warning state
    Alerts,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INCIDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IncidentsArgs {
    #[command(subcommand)]
    pub command: IncidentsCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IncidentTabArg {
    /// New, acknowledged, investigating, assigned or in progress
    Active,
    /// Resolved or closed
    Resolved,
    /// Every incident
    All,
}

#[derive(Debug, Subcommand)]
pub enum IncidentsCommand {
    /// List incidents (search: id, pole id, location)
    #[command(alias = "ls")]
    List {
        /// Which tab of the incident list to show
        #[arg(long, short = 't', value_enum, default_value = "active")]
        tab: IncidentTabArg,

        /// Only show incidents of this severity ("all" for every severity)
        #[arg(long, default_value = "all")]
        severity: String,

        /// Case-insensitive text to look for in the searchable fields
        #[arg(long, short = 's', default_value = "")]
        search: String,
    },

    /// Get incident details with evidence and action log
    Get {
        /// Incident ID (e.g. INC-2024-001)
        incident: String,
    },

    /// Add a comment to an incident's action log
    Comment {
        /// Incident ID
        incident: String,

        /// Comment text
        text: String,

        /// Name recorded as the comment author
        #[arg(long, short = 'u', default_value = "Current User")]
        user: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FIELD JOBS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub command: JobsCommand,
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List field jobs (search: pole id, title, location)
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Get job details with the equipment checklist
    Get {
        /// Job ID or pole code
        job: String,
    },

    /// Print the turn-by-turn directions link to a job site
    #[command(alias = "nav")]
    Navigate {
        /// Job ID or pole code
        job: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CITIZEN REPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CitizenArgs {
    #[command(subcommand)]
    pub command: CitizenCommand,
}

#[derive(Debug, Subcommand)]
pub enum CitizenCommand {
    /// List citizen reports (search: id, title, location)
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Get report details
    Get {
        /// Report ID (e.g. CR-2024-002)
        report: String,
    },

    /// File a new hazard report
    Submit {
        /// Short description of the hazard
        #[arg(long)]
        title: String,

        /// Where the hazard is
        #[arg(long, required_unless_present = "here", conflicts_with = "here")]
        location: Option<String>,

        /// Use the configured position as the location
        #[arg(long)]
        here: bool,

        /// Longer description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,

        /// Photo to attach (repeatable; only the file name is recorded)
        #[arg(long = "photo", value_name = "FILE")]
        photos: Vec<PathBuf>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALERTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List dashboard alerts
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    #[value(name = "last_7_days")]
    Last7Days,
    #[value(name = "last_30_days")]
    Last30Days,
    #[value(name = "last_90_days")]
    Last90Days,
    #[value(name = "last_year")]
    LastYear,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// List report templates
    Templates,

    /// List scheduled reports
    Schedules,

    /// Generate a summary report from a template
    Generate {
        /// Template ID (e.g. incident_summary)
        template: String,

        /// Reporting window
        #[arg(long, short = 'r', value_enum, default_value = "last_30_days")]
        range: RangeArg,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ANALYTICS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    #[command(subcommand)]
    pub command: AnalyticsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AnalyticsCommand {
    /// Model accuracy figures and the risk distribution
    Metrics,

    /// Factors the model weighs, with their impact
    Factors,

    /// Poles expected to fail (search: pole id, location)
    #[command(alias = "ls")]
    Predictions {
        /// Case-insensitive text to look for in the searchable fields
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Only show this risk band: low, medium, high or all
        #[arg(long, short = 'b', default_value = "all")]
        band: String,
    },

    /// One prediction with its reasons
    Prediction {
        /// Pole code (e.g. KL-008-KLM)
        pole: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS & INTEGRATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List operator accounts (search: name, email; --status filters by role)
    #[command(alias = "ls")]
    List(FilterArgs),
}

#[derive(Debug, Args)]
pub struct IntegrationsArgs {
    #[command(subcommand)]
    pub command: IntegrationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum IntegrationsCommand {
    /// List integrations
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a configuration value (e.g. live.interval_ms 500)
    Set {
        /// Dotted key path
        key: String,

        /// New value
        value: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
