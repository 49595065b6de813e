// ── Generic reactive entity collection ──
//
// Concurrent storage with O(1) lookups and push-based change
// notification via `watch` channels.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;

use crate::model::RecordId;

/// What an upsert did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upserted {
    New,
    Changed,
    /// The stored value was already equal; nothing was broadcast.
    Unchanged,
}

struct Slot<T> {
    /// Insertion sequence; snapshots are ordered by it.
    seq: u64,
    value: Arc<T>,
}

/// A reactive collection for a single record type.
///
/// Uses `DashMap` for concurrent lookups and `watch` channels for
/// push-based change notification. Every effective mutation bumps a
/// version counter and rebuilds the snapshot subscribers receive.
pub(crate) struct EntityCollection<T: Clone + PartialEq + Send + Sync + 'static> {
    by_key: DashMap<RecordId, Slot<T>>,

    next_seq: AtomicU64,

    /// Version counter, bumped on every effective mutation.
    version: watch::Sender<u64>,

    /// Full snapshot in insertion order, rebuilt on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_key: DashMap::new(),
            next_seq: AtomicU64::new(0),
            version,
            snapshot,
        }
    }

    /// Insert or replace a record. Replacing with an equal value is a no-op.
    pub(crate) fn upsert(&self, key: RecordId, entity: T) -> Upserted {
        let outcome = match self.by_key.entry(key) {
            Entry::Occupied(mut slot) => {
                if *slot.get().value == entity {
                    Upserted::Unchanged
                } else {
                    slot.get_mut().value = Arc::new(entity);
                    Upserted::Changed
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Slot {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    value: Arc::new(entity),
                });
                Upserted::New
            }
        };

        if outcome != Upserted::Unchanged {
            self.rebuild_snapshot();
            self.bump_version();
        }
        outcome
    }

    /// Remove a record by key. Returns the removed record if it existed.
    pub(crate) fn remove(&self, key: &RecordId) -> Option<Arc<T>> {
        let removed = self.by_key.remove(key).map(|(_, slot)| slot.value);
        if removed.is_some() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    pub(crate) fn get_by_key(&self, key: &RecordId) -> Option<Arc<T>> {
        self.by_key.get(key).map(|r| Arc::clone(&r.value().value))
    }

    /// First record, in insertion order, that satisfies `predicate`.
    pub(crate) fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.snapshot().iter().find(|r| predicate(r)).cloned()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    #[allow(dead_code)]
    pub(crate) fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Return all current keys in the collection.
    pub(crate) fn keys(&self) -> Vec<RecordId> {
        self.by_key.iter().map(|r| r.key().clone()).collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values in insertion order and broadcast to subscribers.
    fn rebuild_snapshot(&self) {
        let mut slots: Vec<(u64, Arc<T>)> = self
            .by_key
            .iter()
            .map(|r| (r.value().seq, Arc::clone(&r.value().value)))
            .collect();
        slots.sort_unstable_by_key(|(seq, _)| *seq);
        let values = slots.into_iter().map(|(_, v)| v).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn values(col: &EntityCollection<String>) -> Vec<String> {
        col.snapshot().iter().map(|v| (**v).clone()).collect()
    }

    #[test]
    fn upsert_reports_new_then_changed() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert_eq!(col.upsert("1".into(), "hello".into()), Upserted::New);
        assert_eq!(col.upsert("1".into(), "world".into()), Upserted::Changed);
        assert_eq!(*col.get_by_key(&"1".into()).unwrap(), "world");
    }

    #[test]
    fn equal_upsert_does_not_bump_version() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert("1".into(), "hello".into());
        let version = col.version();
        let mut rx = col.subscribe();
        rx.borrow_and_update();

        assert_eq!(col.upsert("1".into(), "hello".into()), Upserted::Unchanged);
        assert_eq!(col.version(), version);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn snapshot_keeps_insertion_order() {
        let col: EntityCollection<String> = EntityCollection::new();
        for key in ["KL-030", "KL-001", "KL-012"] {
            col.upsert(key.into(), key.to_owned());
        }
        col.upsert("KL-001".into(), "KL-001*".into());

        assert_eq!(values(&col), vec!["KL-030", "KL-001*", "KL-012"]);
    }

    #[test]
    fn remove_drops_record() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert("1".into(), "hello".into());

        let removed = col.remove(&"1".into());
        assert_eq!(*removed.unwrap(), "hello");
        assert!(col.get_by_key(&"1".into()).is_none());
        assert!(col.is_empty());
        assert!(col.snapshot().is_empty());
    }

    #[test]
    fn find_scans_in_order() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert("a".into(), "kochi-1".into());
        col.upsert("b".into(), "kochi-2".into());
        assert_eq!(*col.find(|v| v.starts_with("kochi")).unwrap(), "kochi-1");
    }
}
