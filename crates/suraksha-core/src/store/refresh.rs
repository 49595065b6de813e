// ── Batch application logic ──
//
// Applies record batches from a `TelemetrySource` into the DataStore.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use super::DataStore;
use super::collection::{EntityCollection, Upserted};
use crate::model::RecordId;
use crate::source::Batch;

/// Upsert all incoming records, then prune any existing keys not in the
/// incoming set. Returns whether the collection changed.
///
/// Avoids the brief empty state that a clear-then-insert causes, and
/// leaves subscribers asleep when the batch matches what is stored.
pub(crate) fn upsert_and_prune<T: Clone + PartialEq + Send + Sync + 'static>(
    collection: &EntityCollection<T>,
    items: Vec<(RecordId, T)>,
) -> bool {
    let incoming_keys: HashSet<RecordId> = items.iter().map(|(k, _)| k.clone()).collect();
    let mut changed = false;
    for (key, entity) in items {
        changed |= collection.upsert(key, entity) != Upserted::Unchanged;
    }
    for existing_key in collection.keys() {
        if !incoming_keys.contains(&existing_key) {
            changed |= collection.remove(&existing_key).is_some();
        }
    }
    changed
}

fn apply<T, F>(collection: &EntityCollection<T>, items: Option<Vec<T>>, key: F) -> bool
where
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(&T) -> RecordId,
{
    let Some(items) = items else {
        return false;
    };
    upsert_and_prune(
        collection,
        items.into_iter().map(|item| (key(&item), item)).collect(),
    )
}

impl DataStore {
    /// Apply a batch. Collections the batch leaves as `None` are kept
    /// as they are. Returns whether anything changed.
    pub(crate) fn apply_batch(&self, batch: Batch) -> bool {
        let mut changed = false;
        changed |= apply(&self.devices, batch.devices, |d| d.id.clone());
        changed |= apply(&self.incidents, batch.incidents, |i| i.id.clone());
        changed |= apply(&self.field_jobs, batch.field_jobs, |j| j.id.clone());
        changed |= apply(&self.citizen_reports, batch.citizen_reports, |r| r.id.clone());
        changed |= apply(&self.telemetry, batch.telemetry, |t| t.id.clone());
        changed |= apply(&self.alerts, batch.alerts, |a| a.id.clone());
        changed |= apply(&self.report_templates, batch.report_templates, |t| t.id.clone());
        changed |= apply(&self.scheduled_reports, batch.scheduled_reports, |s| s.id.clone());
        changed |= apply(&self.users, batch.users, |u| u.id.clone());
        changed |= apply(&self.integrations, batch.integrations, |i| i.id.clone());
        if let Some(analytics) = batch.analytics {
            changed |= self.analytics.send_if_modified(|current| {
                if **current == analytics {
                    return false;
                }
                *current = Arc::new(analytics);
                true
            });
        }

        self.last_refresh.send_replace(Some(Utc::now()));
        changed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;
    use crate::source::{FixtureSource, TelemetrySource};

    #[test]
    fn full_batch_populates_every_collection() {
        let store = DataStore::new();
        assert!(store.apply_batch(FixtureSource.fetch().unwrap()));

        assert_eq!(store.device_count(), 5);
        assert_eq!(store.incident_count(), 3);
        assert_eq!(store.field_jobs_snapshot().len(), 3);
        assert_eq!(store.citizen_report_count(), 3);
        assert_eq!(store.telemetry_snapshot().len(), 8);
        assert_eq!(store.alerts_snapshot().len(), 3);
        assert_eq!(store.report_templates_snapshot().len(), 4);
        assert_eq!(store.scheduled_reports_snapshot().len(), 3);
        assert_eq!(store.users_snapshot().len(), 4);
        assert_eq!(store.integrations_snapshot().len(), 4);
        assert_eq!(store.analytics_snapshot().predictions.len(), 3);
        assert!(store.last_refresh().is_some());
    }

    #[test]
    fn snapshot_follows_fixture_order() {
        let store = DataStore::new();
        store.apply_batch(FixtureSource.fetch().unwrap());

        let poles: Vec<String> = store
            .devices_snapshot()
            .iter()
            .map(|d| d.pole_id.clone())
            .collect();
        assert_eq!(
            poles,
            vec!["KL-001-TVM", "KL-002-KCH", "KL-003-KCH", "KL-004-KLM", "KL-005-TSR"]
        );
    }

    #[test]
    fn identical_batch_changes_nothing() {
        let store = DataStore::new();
        store.apply_batch(FixtureSource.fetch().unwrap());
        let version = store.telemetry.version();

        assert!(!store.apply_batch(FixtureSource.fetch_live().unwrap()));
        assert_eq!(store.telemetry.version(), version);
    }

    #[test]
    fn equal_analytics_do_not_wake_subscribers() {
        let store = DataStore::new();
        store.apply_batch(FixtureSource.fetch().unwrap());
        let mut rx = store.subscribe_analytics();
        rx.borrow_and_update();

        let same = Batch {
            analytics: Some(fixtures::analytics()),
            ..Batch::default()
        };
        assert!(!store.apply_batch(same));
        assert!(!rx.has_changed().unwrap());

        let mut retrained = fixtures::analytics();
        retrained.metrics.accuracy = 95.0;
        let batch = Batch {
            analytics: Some(retrained),
            ..Batch::default()
        };
        assert!(store.apply_batch(batch));
        assert!(rx.has_changed().unwrap());
        assert!((store.analytics_snapshot().metrics.accuracy - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn prune_removes_missing_records() {
        let store = DataStore::new();
        store.apply_batch(FixtureSource.fetch().unwrap());

        let mut devices = fixtures::devices();
        devices.truncate(2);
        let batch = Batch {
            devices: Some(devices),
            ..Batch::default()
        };
        assert!(store.apply_batch(batch));
        assert_eq!(store.device_count(), 2);
        assert_eq!(store.incident_count(), 3);
    }

    #[test]
    fn lookups_accept_pole_codes() {
        let store = DataStore::new();
        store.apply_batch(FixtureSource.fetch().unwrap());

        assert_eq!(store.device("kl-003-kch").unwrap().id.as_str(), "3");
        assert_eq!(store.device("3").unwrap().pole_id, "KL-003-KCH");
        assert_eq!(store.telemetry("KL-007-KLM").unwrap().id.as_str(), "KL-007");
        assert_eq!(store.field_job("job002").unwrap().pole_id, "KL-007-KLM");
        assert!(store.incident("INC-2024-999").is_none());
    }
}
