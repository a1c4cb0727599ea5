//! Id-keyed arena for one entity collection.

use std::collections::BTreeMap;

/// Records keyed by identifier plus the next identifier to hand out.
///
/// Identifiers start at 1, increase by one per insert, and are never reused
/// after a removal.
#[derive(Debug)]
pub(crate) struct Collection<T> {
    records: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Collection<T> {
    /// Build a record around the next identifier and store it.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let record = build(id);
        self.records.insert(id, record.clone());
        record
    }

    pub(crate) fn get(&self, id: u64) -> Option<T> {
        self.records.get(&id).cloned()
    }

    /// Replace a stored record with the result of `change` applied to a copy.
    ///
    /// Returns the new record, or `None` when nothing is stored under `id`.
    pub(crate) fn replace_with(&mut self, id: u64, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut record = self.records.get(&id)?.clone();
        change(&mut record);
        self.records.insert(id, record.clone());
        Some(record)
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        self.records.remove(&id).is_some()
    }

    /// Clones of every record accepted by `keep`, in identifier order.
    pub(crate) fn select(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.records.values().filter(|record| keep(record)).cloned().collect()
    }

    pub(crate) fn find(&self, matches: impl Fn(&T) -> bool) -> Option<T> {
        self.records.values().find(|record| matches(record)).cloned()
    }
}
