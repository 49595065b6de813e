// ── Monitor ──
//
// Lifecycle of the dashboard data layer: initial load, the live-update
// task, command routing and reactive access to the DataStore.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{Datelike, Local};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::MonitorConfig;
use crate::draft::citizen_report_id;
use crate::error::CoreError;
use crate::model::{
    Alert, Analytics, CitizenReport, Device, FailurePrediction, FieldJob, Incident, Integration,
    ReportTemplate, ScheduledReport, Telemetry, UserAccount,
};
use crate::source::{FixtureSource, TelemetrySource};
use crate::store::DataStore;
use crate::stream::EntityStream;

const COMMAND_CHANNEL_SIZE: usize = 64;

/// Display format of action-log timestamps.
const ACTION_TIME_FORMAT: &str = "%H:%M:%S";

// ── Monitor ──────────────────────────────────────────────────────────

/// The main entry point for the CLI and TUI.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Owns the store, the
/// record source and the background tasks started by
/// [`start()`](Self::start).
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    source: Arc<dyn TelemetrySource>,
    store: Arc<DataStore>,
    /// Set by the first successful load. Later starts keep the store
    /// as the operator left it.
    loaded: AtomicBool,
    command_tx: Mutex<mpsc::Sender<CommandEnvelope>>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    /// Child token for the current run: cancelled on stop, replaced on
    /// the next start.
    cancel_child: Mutex<CancellationToken>,
    running: watch::Sender<bool>,
    live: watch::Sender<bool>,
    live_task: Mutex<Option<LiveTask>>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

/// The live-update task of the current run, stoppable on its own.
struct LiveTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Monitor {
    /// Monitor over the built-in deployment records. Does not load;
    /// call [`load()`](Self::load) or [`start()`](Self::start).
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_source(config, Arc::new(FixtureSource))
    }

    pub fn with_source(config: MonitorConfig, source: Arc<dyn TelemetrySource>) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(MonitorInner {
                config,
                source,
                store: Arc::new(DataStore::new()),
                loaded: AtomicBool::new(false),
                command_tx: Mutex::new(command_tx),
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                running: watch::Sender::new(false),
                live: watch::Sender::new(false),
                live_task: Mutex::new(None),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Seed the store from the record source, replacing what it holds.
    pub fn load(&self) -> Result<(), CoreError> {
        let batch = self.inner.source.fetch()?;
        self.inner.store.apply_batch(batch);
        self.inner.loaded.store(true, Ordering::Release);
        info!(
            devices = self.inner.store.device_count(),
            incidents = self.inner.store.incident_count(),
            "records loaded"
        );
        Ok(())
    }

    /// Load on first use, then spawn the command processor and, when
    /// enabled, the live-update task. Calling it on a running monitor
    /// is a no-op. A restart after [`stop()`](Self::stop) keeps the
    /// records, comments and reports already in the store.
    pub async fn start(&self) -> Result<(), CoreError> {
        // Claim the running flag first so concurrent starts cannot both
        // spawn tasks.
        let claimed = self.inner.running.send_if_modified(|running| {
            if *running {
                return false;
            }
            *running = true;
            true
        });
        if !claimed {
            return Ok(());
        }

        if !self.inner.loaded.load(Ordering::Acquire) {
            if let Err(e) = self.load() {
                self.inner.running.send_replace(false);
                return Err(e);
            }
        }

        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let store = Arc::clone(&self.inner.store);
            self.inner
                .task_handles
                .lock()
                .await
                .push(tokio::spawn(command_processor_task(store, rx, child.clone())));
        }

        if self.inner.config.live_enabled() {
            self.spawn_live(&child).await;
        } else {
            debug!("live updates disabled");
        }

        info!("monitor started");
        Ok(())
    }

    /// Cancel and join the background tasks. The store keeps its
    /// records; [`start()`](Self::start) may be called again.
    pub async fn stop(&self) {
        self.inner.cancel_child.lock().await.cancel();
        self.halt_live().await;

        let handles: Vec<_> = self.inner.task_handles.lock().await.drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }

        // The previous receiver was consumed by the command processor.
        {
            let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
            *self.inner.command_tx.lock().await = tx;
            *self.inner.command_rx.lock().await = Some(rx);
        }

        self.inner.running.send_replace(false);
        debug!("monitor stopped");
    }

    /// Stop every run for good, including ones started later by clones.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        *self.inner.running.borrow()
    }

    /// Subscribe to running-state changes.
    pub fn running(&self) -> watch::Receiver<bool> {
        self.inner.running.subscribe()
    }

    // ── Live updates ─────────────────────────────────────────────────

    /// Whether the live-update task is polling the source right now.
    pub fn is_live(&self) -> bool {
        *self.inner.live.borrow()
    }

    /// Subscribe to live-update state changes.
    pub fn live(&self) -> watch::Receiver<bool> {
        self.inner.live.subscribe()
    }

    /// Pause or resume live updates on a running monitor without
    /// touching the command processor. Pausing is always allowed;
    /// resuming needs a running monitor and a non-zero interval.
    pub async fn set_live(&self, enabled: bool) -> Result<(), CoreError> {
        if !enabled {
            self.halt_live().await;
            info!("live updates paused");
            return Ok(());
        }
        if !self.is_running() {
            return Err(CoreError::MonitorStopped);
        }
        if self.inner.config.live_interval.is_zero() {
            return Err(CoreError::validation("live update interval is zero"));
        }
        let run = self.inner.cancel_child.lock().await.clone();
        self.spawn_live(&run).await;
        info!("live updates resumed");
        Ok(())
    }

    async fn spawn_live(&self, run: &CancellationToken) {
        let mut slot = self.inner.live_task.lock().await;
        if slot.is_some() {
            return;
        }
        let cancel = run.child_token();
        let handle = tokio::spawn(live_update_task(
            Arc::clone(&self.inner.source),
            Arc::clone(&self.inner.store),
            self.inner.config.live_interval,
            cancel.clone(),
        ));
        *slot = Some(LiveTask { cancel, handle });
        self.inner.live.send_replace(true);
    }

    async fn halt_live(&self) {
        let task = self.inner.live_task.lock().await.take();
        if let Some(task) = task {
            task.cancel.cancel();
            let _ = task.handle.await;
        }
        self.inner.live.send_replace(false);
    }

    // ── Command execution ────────────────────────────────────────────

    /// Execute a command.
    ///
    /// A running monitor routes it through the command processor task;
    /// otherwise it is applied inline.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if !self.is_running() {
            return apply_command(&self.inner.store, cmd);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        let command_tx = self.inner.command_tx.lock().await.clone();

        command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::MonitorStopped)?;

        rx.await.map_err(|_| CoreError::MonitorStopped)?
    }

    // ── One-shot convenience ─────────────────────────────────────────

    /// Load, run `f`, done. No background tasks are spawned.
    pub async fn oneshot<F, Fut, T>(config: MonitorConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Monitor) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let monitor = Monitor::new(config);
        monitor.load()?;
        f(monitor).await
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn devices_snapshot(&self) -> Arc<Vec<Arc<Device>>> {
        self.inner.store.devices_snapshot()
    }

    pub fn incidents_snapshot(&self) -> Arc<Vec<Arc<Incident>>> {
        self.inner.store.incidents_snapshot()
    }

    pub fn field_jobs_snapshot(&self) -> Arc<Vec<Arc<FieldJob>>> {
        self.inner.store.field_jobs_snapshot()
    }

    pub fn citizen_reports_snapshot(&self) -> Arc<Vec<Arc<CitizenReport>>> {
        self.inner.store.citizen_reports_snapshot()
    }

    pub fn telemetry_snapshot(&self) -> Arc<Vec<Arc<Telemetry>>> {
        self.inner.store.telemetry_snapshot()
    }

    pub fn alerts_snapshot(&self) -> Arc<Vec<Arc<Alert>>> {
        self.inner.store.alerts_snapshot()
    }

    pub fn report_templates_snapshot(&self) -> Arc<Vec<Arc<ReportTemplate>>> {
        self.inner.store.report_templates_snapshot()
    }

    pub fn scheduled_reports_snapshot(&self) -> Arc<Vec<Arc<ScheduledReport>>> {
        self.inner.store.scheduled_reports_snapshot()
    }

    pub fn analytics_snapshot(&self) -> Arc<Analytics> {
        self.inner.store.analytics_snapshot()
    }

    pub fn users_snapshot(&self) -> Arc<Vec<Arc<UserAccount>>> {
        self.inner.store.users_snapshot()
    }

    pub fn integrations_snapshot(&self) -> Arc<Vec<Arc<Integration>>> {
        self.inner.store.integrations_snapshot()
    }

    // ── Streams ──────────────────────────────────────────────────────

    pub fn devices(&self) -> EntityStream<Device> {
        self.inner.store.subscribe_devices()
    }

    pub fn incidents(&self) -> EntityStream<Incident> {
        self.inner.store.subscribe_incidents()
    }

    pub fn field_jobs(&self) -> EntityStream<FieldJob> {
        self.inner.store.subscribe_field_jobs()
    }

    pub fn citizen_reports(&self) -> EntityStream<CitizenReport> {
        self.inner.store.subscribe_citizen_reports()
    }

    pub fn telemetry(&self) -> EntityStream<Telemetry> {
        self.inner.store.subscribe_telemetry()
    }

    pub fn alerts(&self) -> EntityStream<Alert> {
        self.inner.store.subscribe_alerts()
    }

    pub fn report_templates(&self) -> EntityStream<ReportTemplate> {
        self.inner.store.subscribe_report_templates()
    }

    pub fn scheduled_reports(&self) -> EntityStream<ScheduledReport> {
        self.inner.store.subscribe_scheduled_reports()
    }

    pub fn analytics(&self) -> watch::Receiver<Arc<Analytics>> {
        self.inner.store.subscribe_analytics()
    }

    pub fn users(&self) -> EntityStream<UserAccount> {
        self.inner.store.subscribe_users()
    }

    pub fn integrations(&self) -> EntityStream<Integration> {
        self.inner.store.subscribe_integrations()
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn device(&self, identifier: &str) -> Result<Arc<Device>, CoreError> {
        self.inner
            .store
            .device(identifier)
            .ok_or_else(|| CoreError::not_found("Device", identifier))
    }

    pub fn incident(&self, identifier: &str) -> Result<Arc<Incident>, CoreError> {
        self.inner
            .store
            .incident(identifier)
            .ok_or_else(|| CoreError::not_found("Incident", identifier))
    }

    pub fn job(&self, identifier: &str) -> Result<Arc<FieldJob>, CoreError> {
        self.inner
            .store
            .field_job(identifier)
            .ok_or_else(|| CoreError::not_found("Field job", identifier))
    }

    pub fn citizen_report(&self, identifier: &str) -> Result<Arc<CitizenReport>, CoreError> {
        self.inner
            .store
            .citizen_report(identifier)
            .ok_or_else(|| CoreError::not_found("Citizen report", identifier))
    }

    pub fn telemetry_reading(&self, identifier: &str) -> Result<Arc<Telemetry>, CoreError> {
        self.inner
            .store
            .telemetry(identifier)
            .ok_or_else(|| CoreError::not_found("Telemetry", identifier))
    }

    pub fn report_template(&self, identifier: &str) -> Result<Arc<ReportTemplate>, CoreError> {
        self.inner
            .store
            .report_template(identifier)
            .ok_or_else(|| CoreError::not_found("Report template", identifier))
    }

    /// Failure prediction for a pole code.
    pub fn prediction(&self, pole: &str) -> Result<FailurePrediction, CoreError> {
        self.analytics_snapshot()
            .prediction(pole)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Prediction", pole))
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Poll the source on a fixed period and apply what it returns.
async fn live_update_task(
    source: Arc<dyn TelemetrySource>,
    store: Arc<DataStore>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                debug!("fetching live updates");
                match source.fetch_live() {
                    Ok(batch) => {
                        if store.apply_batch(batch) {
                            debug!("live update changed the store");
                        }
                    }
                    Err(e) => warn!(error = %e, "live update failed"),
                }
            }
        }
    }
}

/// Apply commands from the channel one at a time.
async fn command_processor_task(
    store: Arc<DataStore>,
    mut rx: mpsc::Receiver<CommandEnvelope>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = apply_command(&store, envelope.command);
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command application ──────────────────────────────────────────────

fn apply_command(store: &DataStore, cmd: Command) -> Result<CommandResult, CoreError> {
    match cmd {
        Command::AddComment {
            incident,
            user,
            details,
        } => {
            let current = store
                .incident(incident.as_str())
                .ok_or_else(|| CoreError::not_found("Incident", incident.as_str()))?;
            let mut updated = (*current).clone();
            let timestamp = Local::now().format(ACTION_TIME_FORMAT).to_string();
            updated.add_comment(user, &details, timestamp)?;
            store.incidents.upsert(updated.id.clone(), updated.clone());
            debug!(incident = %updated.id, actions = updated.actions.len(), "comment added");
            Ok(CommandResult::Incident(updated))
        }
        Command::SubmitReport { mut draft } => {
            let today = Local::now().date_naive();
            let year = today.year();
            let mut sequence = store.citizen_report_count() + 1;
            while store.citizen_report(citizen_report_id(year, sequence).as_str()).is_some() {
                sequence += 1;
            }
            let report = draft.submit(citizen_report_id(year, sequence), today)?;
            store
                .citizen_reports
                .upsert(report.id.clone(), report.clone());
            info!(report = %report.id, "citizen report submitted");
            Ok(CommandResult::CitizenReport(report))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::command::DEFAULT_USER;
    use crate::draft::ReportDraft;
    use crate::model::{IncidentActionKind, RecordId, ReportStatus};
    use crate::source::Batch;

    fn comment(incident: &str, details: &str) -> Command {
        Command::AddComment {
            incident: RecordId::from(incident),
            user: DEFAULT_USER.into(),
            details: details.into(),
        }
    }

    #[tokio::test]
    async fn inline_comment_updates_store() {
        let monitor = Monitor::new(MonitorConfig::oneshot());
        monitor.load().unwrap();

        let result = monitor.execute(comment("INC-2024-001", " On site ")).await.unwrap();
        let CommandResult::Incident(incident) = result else {
            panic!("expected an incident");
        };

        let last = incident.actions.last().unwrap();
        assert_eq!(last.kind, IncidentActionKind::Commented);
        assert_eq!(last.details, "On site");
        assert_eq!(last.user, DEFAULT_USER);
        assert_eq!(monitor.incident("INC-2024-001").unwrap().actions.len(), 4);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_without_change() {
        let monitor = Monitor::new(MonitorConfig::oneshot());
        monitor.load().unwrap();

        let err = monitor.execute(comment("INC-2024-002", "  ")).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(monitor.incident("INC-2024-002").unwrap().actions.len(), 2);
    }

    #[tokio::test]
    async fn unknown_incident_is_not_found() {
        let monitor = Monitor::new(MonitorConfig::oneshot());
        monitor.load().unwrap();
        let err = monitor.execute(comment("INC-1999-001", "hello")).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn running_monitor_routes_commands_through_channel() {
        let monitor = Monitor::new(MonitorConfig::oneshot());
        monitor.start().await.unwrap();
        assert!(monitor.is_running());

        let draft = ReportDraft {
            title: "Wire touching tree".into(),
            location: "Kumarakom".into(),
            ..ReportDraft::default()
        };
        let result = monitor.execute(Command::SubmitReport { draft }).await.unwrap();
        let CommandResult::CitizenReport(report) = result else {
            panic!("expected a report");
        };
        assert_eq!(report.status, ReportStatus::Submitted);
        assert!(report.id.as_str().ends_with("-004"));
        assert_eq!(monitor.citizen_reports_snapshot().len(), 4);

        monitor.stop().await;
        assert!(!monitor.is_running());

        // Still usable inline after stopping.
        monitor.execute(comment("INC-2024-003", "Ack")).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn live_ticks_with_fixture_source_wake_nobody() {
        let monitor = Monitor::new(MonitorConfig::default());
        monitor.start().await.unwrap();
        let mut telemetry = monitor.telemetry();

        tokio::time::advance(Duration::from_secs(7)).await;
        let woke =
            tokio::time::timeout(Duration::from_millis(10), telemetry.changed()).await;
        assert!(woke.is_err());
        assert_eq!(telemetry.latest().len(), 8);

        monitor.stop().await;
    }

    #[tokio::test]
    async fn start_sets_running_without_a_subscriber() {
        let monitor = Monitor::new(MonitorConfig::oneshot());
        monitor.start().await.unwrap();
        assert!(monitor.is_running());
        assert!(!monitor.is_live());
        monitor.stop().await;
        assert!(!monitor.is_running());
    }

    #[tokio::test]
    async fn start_is_idempotent_and_restartable() {
        let monitor = Monitor::new(MonitorConfig::default());
        let cycle = async {
            monitor.start().await.unwrap();
            monitor.start().await.unwrap();
            monitor.stop().await;
            assert!(!monitor.is_running());
            monitor.start().await.unwrap();
            assert!(monitor.is_running());
            assert!(monitor.is_live());
            monitor.stop().await;
        };
        tokio::time::timeout(Duration::from_secs(5), cycle).await.unwrap();
        assert!(!monitor.is_live());
    }

    #[tokio::test]
    async fn restart_keeps_operator_edits() {
        let monitor = Monitor::new(MonitorConfig::oneshot());
        monitor.start().await.unwrap();

        let draft = ReportDraft {
            title: "Sagging line".into(),
            location: "Alappuzha".into(),
            ..ReportDraft::default()
        };
        monitor.execute(Command::SubmitReport { draft }).await.unwrap();
        monitor.execute(comment("INC-2024-002", "Crew dispatched")).await.unwrap();

        monitor.stop().await;
        monitor.start().await.unwrap();

        assert_eq!(monitor.citizen_reports_snapshot().len(), 4);
        let incident = monitor.incident("INC-2024-002").unwrap();
        assert_eq!(incident.actions.len(), 3);
        assert_eq!(incident.actions.last().unwrap().details, "Crew dispatched");
        monitor.stop().await;
    }

    #[derive(Default)]
    struct CountingSource {
        live_fetches: AtomicUsize,
    }

    impl TelemetrySource for CountingSource {
        fn fetch(&self) -> Result<Batch, CoreError> {
            FixtureSource.fetch()
        }

        fn fetch_live(&self) -> Result<Batch, CoreError> {
            self.live_fetches.fetch_add(1, Ordering::SeqCst);
            FixtureSource.fetch_live()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn live_updates_pause_and_resume() {
        let source = Arc::new(CountingSource::default());
        let monitor = Monitor::with_source(MonitorConfig::default(), source.clone());
        let fetches = || source.live_fetches.load(Ordering::SeqCst);

        monitor.start().await.unwrap();
        assert!(monitor.is_live());
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(fetches(), 1);

        monitor.set_live(false).await.unwrap();
        assert!(!monitor.is_live());
        assert!(monitor.is_running());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fetches(), 1);

        monitor.set_live(true).await.unwrap();
        assert!(monitor.is_live());
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(fetches(), 2);

        monitor.stop().await;
        assert!(!monitor.is_live());
        let err = monitor.set_live(true).await.unwrap_err();
        assert!(matches!(err, CoreError::MonitorStopped));
    }

    #[tokio::test]
    async fn live_state_is_published_to_subscribers() {
        let monitor = Monitor::new(MonitorConfig::default());
        let mut live = monitor.live();
        monitor.start().await.unwrap();
        assert!(*live.borrow_and_update());

        monitor.set_live(false).await.unwrap();
        assert!(live.has_changed().unwrap());
        assert!(!*live.borrow_and_update());
        monitor.stop().await;
    }

    #[tokio::test]
    async fn lookups_report_not_found() {
        let result = Monitor::oneshot(MonitorConfig::oneshot(), |m| async move {
            m.device("KL-999-XXX").map(|_| ())
        })
        .await;
        assert!(matches!(result, Err(CoreError::NotFound { entity_type: "Device", .. })));
    }
}
