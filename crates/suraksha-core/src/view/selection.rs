// ── Bulk-selection state ──

use std::hash::Hash;

use indexmap::IndexSet;

/// Set of selected record ids for bulk actions.
///
/// Iterates in the order ids were selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Hash + Eq> {
    selected: IndexSet<K>,
}

impl<K: Hash + Eq> Default for Selection<K> {
    fn default() -> Self {
        Self {
            selected: IndexSet::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> Selection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: K) -> bool {
        if self.selected.shift_remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Select exactly `ids`, or clear if that is already the selection.
    ///
    /// Never a union: a second call with a different id list replaces
    /// the selection.
    pub fn toggle_all(&mut self, ids: impl IntoIterator<Item = K>) {
        let incoming: IndexSet<K> = ids.into_iter().collect();
        if incoming == self.selected {
            self.selected.clear();
        } else {
            self.selected = incoming;
        }
    }

    pub fn contains(&self, id: &K) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// Drop ids that are no longer in `live`.
    pub fn retain_present<'a>(&mut self, live: impl IntoIterator<Item = &'a K>)
    where
        K: 'a,
    {
        let live: IndexSet<&K> = live.into_iter().collect();
        self.selected.retain(|id| live.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn double_toggle_is_identity() {
        let mut selection = Selection::new();
        selection.toggle("1".to_owned());
        let before = selection.clone();

        assert!(selection.toggle("2".to_owned()));
        assert!(!selection.toggle("2".to_owned()));
        assert_eq!(selection, before);

        assert!(!selection.toggle("1".to_owned()));
        assert!(selection.toggle("1".to_owned()));
        assert_eq!(selection, before);
    }

    #[test]
    fn toggle_all_twice_restores_empty_selection() {
        let mut selection: Selection<String> = Selection::new();
        selection.toggle_all(ids(&["1", "2", "3"]));
        assert_eq!(selection.len(), 3);

        selection.toggle_all(ids(&["1", "2", "3"]));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_ignores_order_when_comparing() {
        let mut selection: Selection<String> = Selection::new();
        selection.toggle_all(ids(&["1", "2", "3"]));
        selection.toggle_all(ids(&["3", "1", "2"]));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_replaces_rather_than_merges() {
        let mut selection: Selection<String> = Selection::new();
        selection.toggle_all(ids(&["1", "2", "3"]));
        selection.toggle_all(ids(&["4", "5"]));

        assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), ids(&["4", "5"]));
        assert!(!selection.contains(&"1".to_owned()));
    }

    #[test]
    fn toggle_all_from_partial_selection_selects_everything() {
        let mut selection: Selection<String> = Selection::new();
        selection.toggle("2".to_owned());
        selection.toggle_all(ids(&["1", "2", "3"]));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn retain_present_drops_vanished_ids() {
        let mut selection: Selection<String> = Selection::new();
        selection.toggle_all(ids(&["1", "2", "3"]));
        let live = ids(&["1", "3"]);
        selection.retain_present(&live);
        assert_eq!(selection.iter().cloned().collect::<Vec<_>>(), live);
    }
}
