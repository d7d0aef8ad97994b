use indexmap::IndexMap;

use crate::{DishEntry, DishId, DishPatch};

/// Insertion-ordered dish entries. The only write path for entry state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DishRegistry {
    entries: IndexMap<DishId, DishEntry>,
}

impl DishRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds entries at the end, keeping their relative order.
    ///
    /// An entry whose id is already present is skipped; ids never repeat.
    pub fn append(&mut self, entries: impl IntoIterator<Item = DishEntry>) -> usize {
        let before = self.entries.len();
        for entry in entries {
            self.entries.entry(entry.id).or_insert(entry);
        }
        self.entries.len() - before
    }

    /// Removes the entry; absent ids are a no-op.
    pub fn remove(&mut self, id: DishId) -> Option<DishEntry> {
        self.entries.shift_remove(&id)
    }

    /// Merges a patch into the entry; absent ids are a no-op.
    ///
    /// Returns whether an entry was touched.
    pub fn patch(&mut self, id: DishId, patch: DishPatch) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current entries in registry order.
    pub fn snapshot(&self) -> Vec<DishEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DishEntry> {
        self.entries.values()
    }

    pub fn get(&self, id: DishId) -> Option<&DishEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: DishId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Id at a zero-based position.
    pub fn id_at(&self, index: usize) -> Option<DishId> {
        self.entries.get_index(index).map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of idle or failed entries, in registry order.
    pub fn pending_ids(&self) -> Vec<DishId> {
        self.entries
            .values()
            .filter(|entry| entry.status.is_pending())
            .map(|entry| entry.id)
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.status.is_pending())
            .count()
    }
}
