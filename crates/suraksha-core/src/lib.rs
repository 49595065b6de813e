//! Data layer shared by the SurakshaJyoti CLI and TUI.
//!
//! This crate owns the domain model, the pilot deployment records and
//! the reactive infrastructure both front ends render from:
//!
//! - **[`Monitor`]**: Central facade. [`load()`](Monitor::load) seeds the
//!   store from a [`TelemetrySource`]; [`start()`](Monitor::start) also
//!   spawns the live-update and command-processor tasks.
//!   [`Monitor::oneshot()`](Monitor::oneshot) is the lightweight mode for a
//!   single CLI invocation.
//!
//! - **[`DataStore`]**: Reactive storage built on `EntityCollection<T>`
//!   (`DashMap` + `tokio::sync::watch` channels). Snapshots keep the
//!   source's record order.
//!
//! - **[`EntityStream<T>`]**: Subscription handle vended by the store,
//!   with `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`Command`]**: Operator mutations (incident comments, citizen
//!   reports) routed through an `mpsc` channel to the command processor.
//!
//! - **[`view`]**: Pure list helpers: search and category filters, status
//!   tallies, bulk selection and the detail-panel pointer.
//!
//! - **Domain model** ([`model`]): Devices, incidents, field jobs, citizen
//!   reports, telemetry and the report catalogue, with closed enums for
//!   every status vocabulary.

pub mod command;
pub mod config;
pub mod draft;
pub mod error;
pub mod fixtures;
pub mod geo;
pub mod model;
pub mod monitor;
pub mod source;
pub mod store;
pub mod stream;
pub mod summary;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult, DEFAULT_USER};
pub use config::MonitorConfig;
pub use draft::ReportDraft;
pub use error::CoreError;
pub use geo::{ConfiguredLocator, Coordinates, LocateError, Locator};
pub use monitor::Monitor;
pub use source::{Batch, FixtureSource, TelemetrySource};
pub use store::DataStore;
pub use stream::EntityStream;
pub use summary::{DateRange, OperationsSummary};

// ── Model re-exports ────────────────────────────────────────────────
pub use model::{
    AccountStatus, Alert, AlertLevel, Analytics, CitizenReport, Device, DeviceStatus,
    FailurePrediction, FieldJob, Incident, IncidentAction, IncidentActionKind, IncidentStatus,
    IncidentType, Integration, IntegrationStatus, JobStatus, ModelMetrics, PRIORITY_RISK_SCORE,
    Percent, RecordId, ReportStatus, ReportTemplate, RiskBand, RiskDistribution, RiskFactor,
    ScheduleStatus, ScheduledReport, Severity, Telemetry, TelemetryAlert, UserAccount, UserRole,
};
