use std::collections::HashMap;

use crate::error::StoreError;
use crate::models::Entry;

/// Ordered collection of entries with no two sharing an identity key.
///
/// A side index keyed on the serialized link gives O(1) membership checks.
/// Every mutating call either leaves the invariant intact or leaves the
/// store untouched and reports why.
#[derive(Clone, Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, rejecting duplicate identity keys.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for entry in entries {
            store.add(entry)?;
        }
        Ok(store)
    }

    pub fn add(&mut self, entry: Entry) -> Result<(), StoreError> {
        if self.index.contains_key(entry.key()) {
            return Err(StoreError::DuplicateEntry(entry.key().to_owned()));
        }
        self.index.insert(entry.key().to_owned(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the entry sharing `entry`'s identity key and return it.
    pub fn remove(&mut self, entry: &Entry) -> Result<Entry, StoreError> {
        let pos = *self
            .index
            .get(entry.key())
            .ok_or_else(|| StoreError::EntryNotFound(entry.key().to_owned()))?;
        let removed = self.entries.remove(pos);
        self.index.remove(removed.key());
        // positions after the hole shifted down by one
        for (i, e) in self.entries.iter().enumerate().skip(pos) {
            self.index.insert(e.key().to_owned(), i);
        }
        Ok(removed)
    }

    /// Swap `old` for `new` in place. Replacing an entry with itself, or with
    /// a value-only change, is legal; colliding with a *different* entry is
    /// not.
    pub fn replace(&mut self, old: &Entry, new: Entry) -> Result<(), StoreError> {
        let pos = *self
            .index
            .get(old.key())
            .ok_or_else(|| StoreError::EntryNotFound(old.key().to_owned()))?;
        if !new.same_entry(old) && self.index.contains_key(new.key()) {
            return Err(StoreError::DuplicateEntry(new.key().to_owned()));
        }
        self.index.remove(old.key());
        self.index.insert(new.key().to_owned(), pos);
        self.entries[pos] = new;
        Ok(())
    }

    /// Replace the whole contents, rejecting duplicate input wholesale.
    pub fn set_all(&mut self, entries: Vec<Entry>) -> Result<(), StoreError> {
        let fresh = Self::from_entries(entries)?;
        *self = fresh;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Identity-key membership.
    pub fn contains(&self, entry: &Entry) -> bool {
        self.index.contains_key(entry.key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, pos: usize) -> Option<&Entry> {
        self.entries.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Equality is over the ordered contents; the index is derived state.
impl PartialEq for EntryStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for EntryStore {}
