//! Data bridge: connects [`Monitor`] streams to TUI actions.
//!
//! Runs as a background task: subscribes to entity streams, analytics
//! and the monitor's live-update state, forwarding every change as an
//! [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use suraksha_core::Monitor;

use crate::action::{Action, Notification};

/// Spawn the data bridge connecting [`Monitor`] reactive streams to the TUI.
///
/// Starts the monitor, sends initial data snapshots, then loops
/// forwarding every entity change and live-state transition as an
/// [`Action`]. Shuts down cleanly on cancellation.
pub async fn spawn_data_bridge(
    monitor: Monitor,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    if let Err(e) = monitor.start().await {
        warn!(error = %e, "failed to start monitor");
        let _ = action_tx.send(Action::Notify(Notification::error(format!(
            "Failed to load records: {e}"
        ))));
        return;
    }

    // Subscribe to entity streams
    let mut devices = monitor.devices();
    let mut incidents = monitor.incidents();
    let mut jobs = monitor.field_jobs();
    let mut citizen = monitor.citizen_reports();
    let mut telemetry = monitor.telemetry();
    let mut alerts = monitor.alerts();
    let mut templates = monitor.report_templates();
    let mut schedules = monitor.scheduled_reports();
    let mut users = monitor.users();
    let mut integrations = monitor.integrations();
    let mut analytics = monitor.analytics();
    let mut live = monitor.live();

    // Push initial snapshots so screens have data immediately
    let _ = action_tx.send(Action::DevicesUpdated(devices.current().clone()));
    let _ = action_tx.send(Action::IncidentsUpdated(incidents.current().clone()));
    let _ = action_tx.send(Action::JobsUpdated(jobs.current().clone()));
    let _ = action_tx.send(Action::CitizenReportsUpdated(citizen.current().clone()));
    let _ = action_tx.send(Action::TelemetryUpdated(telemetry.current().clone()));
    let _ = action_tx.send(Action::AlertsUpdated(alerts.current().clone()));
    let _ = action_tx.send(Action::ReportTemplatesUpdated(
        templates.current().clone(),
    ));
    let _ = action_tx.send(Action::ScheduledReportsUpdated(
        schedules.current().clone(),
    ));
    let _ = action_tx.send(Action::UsersUpdated(users.current().clone()));
    let _ = action_tx.send(Action::IntegrationsUpdated(
        integrations.current().clone(),
    ));
    let current = analytics.borrow_and_update().clone();
    let _ = action_tx.send(Action::AnalyticsUpdated(current));
    let is_live = *live.borrow_and_update();
    let _ = action_tx.send(Action::LiveState(is_live));

    // Stream loop: forward every change until cancelled
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(d) = devices.changed() => {
                debug!("dispatching DevicesUpdated");
                let _ = action_tx.send(Action::DevicesUpdated(d));
            }
            Some(i) = incidents.changed() => {
                debug!("dispatching IncidentsUpdated");
                let _ = action_tx.send(Action::IncidentsUpdated(i));
            }
            Some(j) = jobs.changed() => {
                let _ = action_tx.send(Action::JobsUpdated(j));
            }
            Some(c) = citizen.changed() => {
                let _ = action_tx.send(Action::CitizenReportsUpdated(c));
            }
            Some(t) = telemetry.changed() => {
                debug!("dispatching TelemetryUpdated");
                let _ = action_tx.send(Action::TelemetryUpdated(t));
            }
            Some(a) = alerts.changed() => {
                let _ = action_tx.send(Action::AlertsUpdated(a));
            }
            Some(t) = templates.changed() => {
                let _ = action_tx.send(Action::ReportTemplatesUpdated(t));
            }
            Some(s) = schedules.changed() => {
                let _ = action_tx.send(Action::ScheduledReportsUpdated(s));
            }
            Some(u) = users.changed() => {
                let _ = action_tx.send(Action::UsersUpdated(u));
            }
            Some(i) = integrations.changed() => {
                let _ = action_tx.send(Action::IntegrationsUpdated(i));
            }
            Ok(()) = analytics.changed() => {
                debug!("dispatching AnalyticsUpdated");
                let current = analytics.borrow_and_update().clone();
                let _ = action_tx.send(Action::AnalyticsUpdated(current));
            }
            Ok(()) = live.changed() => {
                let is_live = *live.borrow_and_update();
                debug!(live = is_live, "live state changed");
                let _ = action_tx.send(Action::LiveState(is_live));
            }
        }
    }

    debug!("data bridge shut down");
}
