// ── Status tallies ──

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use super::filter::Categorized;

/// Count of records per category value.
///
/// Only categories that occur get a key; [`Tally::get`] reads absent
/// keys as zero. Keys iterate in the vocabulary's declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally<C: Ord> {
    counts: BTreeMap<C, usize>,
}

impl<C: Ord + Copy> Tally<C> {
    pub fn get(&self, category: C) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Equal to the number of records tallied.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Categories present, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (C, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }

    /// Every value of the vocabulary, absent ones as zero.
    pub fn zero_filled(&self) -> Vec<(C, usize)>
    where
        C: IntoEnumIterator,
    {
        C::iter().map(|c| (c, self.get(c))).collect()
    }
}

impl<C: Ord> Default for Tally<C> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

/// Count `records` by category.
pub fn tally<C, R>(records: impl IntoIterator<Item = R>) -> Tally<C>
where
    C: Ord + Copy,
    R: Categorized<C>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.category()).or_insert(0) += 1;
    }
    Tally { counts }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures;
    use crate::model::{DeviceStatus, IncidentStatus, JobStatus, Severity};

    #[test]
    fn device_statuses_tally_to_fixture_counts() {
        let devices = fixtures::devices();
        let counts: Tally<DeviceStatus> = tally(&devices);

        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            vec![
                (DeviceStatus::Healthy, 2),
                (DeviceStatus::Warning, 1),
                (DeviceStatus::Critical, 1),
                (DeviceStatus::Offline, 1),
            ]
        );
        assert_eq!(counts.total(), devices.len());
    }

    #[test]
    fn absent_categories_read_as_zero() {
        let jobs = fixtures::field_jobs();
        let counts: Tally<JobStatus> = tally(&jobs);

        assert_eq!(counts.get(JobStatus::Completed), 0);
        assert_eq!(counts.iter().count(), 3);
        assert_eq!(
            counts.zero_filled(),
            vec![
                (JobStatus::Assigned, 1),
                (JobStatus::InProgress, 1),
                (JobStatus::Completed, 0),
                (JobStatus::Pending, 1),
            ]
        );
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let mut incidents = fixtures::incidents();
        let forward: Tally<Severity> = tally(&incidents);
        incidents.reverse();
        let backward: Tally<Severity> = tally(&incidents);
        assert_eq!(forward, backward);
    }

    #[test]
    fn counts_match_per_status() {
        let incidents = fixtures::incidents();
        let counts: Tally<IncidentStatus> = tally(&incidents);
        for (status, n) in counts.iter() {
            assert_eq!(n, incidents.iter().filter(|i| i.status == status).count());
        }
    }

    #[test]
    fn empty_input_has_no_keys() {
        let counts: Tally<DeviceStatus> = tally(Vec::<crate::model::Device>::new());
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn serializes_as_plain_map() {
        let counts: Tally<DeviceStatus> = tally(&fixtures::devices());
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["healthy"], 2);
        assert_eq!(json["offline"], 1);
    }
}
