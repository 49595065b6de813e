// ── Derived list state ──
//
// Pure helpers that turn a snapshot into what a page shows: filtered
// lists, status tallies, bulk selection and the detail panel.

pub mod aggregate;
pub mod detail;
pub mod filter;
pub mod selection;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use aggregate::{Tally, tally};
pub use detail::Detail;
pub use filter::{Categorized, CategoryFilter, ListFilter, Searchable};
pub use selection::Selection;

use crate::model::IncidentStatus;

/// Tabs of the incident list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IncidentTab {
    #[default]
    Active,
    Resolved,
    All,
}

impl IncidentTab {
    pub fn includes(self, status: IncidentStatus) -> bool {
        match self {
            Self::Active => status.is_active(),
            Self::Resolved => status.is_resolved(),
            Self::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn active_and_resolved_tabs_partition_all() {
        for status in IncidentStatus::iter() {
            assert!(IncidentTab::All.includes(status));
            assert_ne!(
                IncidentTab::Active.includes(status),
                IncidentTab::Resolved.includes(status)
            );
        }
    }

    #[test]
    fn fixture_incidents_are_all_active() {
        let active = crate::fixtures::incidents()
            .into_iter()
            .filter(|i| IncidentTab::Active.includes(i.status))
            .count();
        assert_eq!(active, 3);
    }
}
