use std::fmt;

use crate::error::{HistoryError, StoreError};
use crate::history::History;
use crate::models::Entry;
use crate::search::SearchPredicate;
use crate::store::EntryStore;

/// The active view. Gates which store index-based commands address and which
/// command words the parser accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    List,
    Archives,
    Feeds,
    Search,
}

impl Context {
    /// Name used for persistence and messages.
    pub fn store_name(self) -> &'static str {
        match self {
            Context::List => "list",
            Context::Archives => "archives",
            Context::Feeds => "feeds",
            Context::Search => "search",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_name())
    }
}

/// Sole owner of the four stores, their histories, the active context, the
/// filtered view and the selection. Passed `&mut` into command execution;
/// commands hold no store references beyond the call.
#[derive(Debug)]
pub struct Model {
    list: EntryStore,
    archives: EntryStore,
    feeds: EntryStore,
    search: EntryStore,
    list_history: History,
    archives_history: History,
    feeds_history: History,
    search_history: History,
    pub context: Context,
    pub filter: Option<SearchPredicate>,
    pub selected: Option<Entry>,
}

impl Model {
    pub fn new() -> Self {
        Self::with_stores(EntryStore::new(), EntryStore::new(), EntryStore::new())
    }

    /// Seed the durable stores, e.g. from storage at startup.
    pub fn with_stores(list: EntryStore, archives: EntryStore, feeds: EntryStore) -> Self {
        Self {
            list_history: History::new(list.clone()),
            archives_history: History::new(archives.clone()),
            feeds_history: History::new(feeds.clone()),
            search_history: History::default(),
            list,
            archives,
            feeds,
            search: EntryStore::new(),
            context: Context::List,
            filter: None,
            selected: None,
        }
    }

    pub fn store(&self, context: Context) -> &EntryStore {
        match context {
            Context::List => &self.list,
            Context::Archives => &self.archives,
            Context::Feeds => &self.feeds,
            Context::Search => &self.search,
        }
    }

    pub fn store_mut(&mut self, context: Context) -> &mut EntryStore {
        match context {
            Context::List => &mut self.list,
            Context::Archives => &mut self.archives,
            Context::Feeds => &mut self.feeds,
            Context::Search => &mut self.search,
        }
    }

    fn history_mut(&mut self, context: Context) -> &mut History {
        match context {
            Context::List => &mut self.list_history,
            Context::Archives => &mut self.archives_history,
            Context::Feeds => &mut self.feeds_history,
            Context::Search => &mut self.search_history,
        }
    }

    pub fn active(&self) -> &EntryStore {
        self.store(self.context)
    }

    /// The displayed list: the active store projected through the filter.
    /// Index-based commands address this, not the underlying store.
    pub fn visible(&self) -> Vec<&Entry> {
        match &self.filter {
            None => self.active().iter().collect(),
            Some(predicate) => self
                .active()
                .iter()
                .filter(|e| predicate.matches(e))
                .collect(),
        }
    }

    /// Entry at a zero-based position of the displayed list.
    pub fn visible_entry(&self, pos: usize) -> Option<&Entry> {
        self.visible().get(pos).copied()
    }

    /// Switch context: the view follows the new store, the filter and the
    /// selection reset.
    pub fn enter(&mut self, context: Context) {
        self.context = context;
        self.filter = None;
        self.selected = None;
    }

    /// Enter the search view over a freshly built result store.
    pub fn enter_search(&mut self, results: EntryStore) {
        self.search_history = History::new(results.clone());
        self.search = results;
        self.enter(Context::Search);
    }

    /// Snapshot the store's current state onto its history.
    pub fn commit(&mut self, context: Context) {
        let state = self.store(context).clone();
        self.history_mut(context).commit(state);
    }

    pub fn undo(&mut self, context: Context) -> Result<(), HistoryError> {
        let state = self.history_mut(context).undo()?;
        *self.store_mut(context) = state;
        Ok(())
    }

    pub fn redo(&mut self, context: Context) -> Result<(), HistoryError> {
        let state = self.history_mut(context).redo()?;
        *self.store_mut(context) = state;
        Ok(())
    }

    /// Move an entry from the reading list to the archives. The destination
    /// is checked first so a duplicate leaves both stores untouched.
    pub fn archive_entry(&mut self, entry: &Entry) -> Result<(), StoreError> {
        if self.archives.contains(entry) {
            return Err(StoreError::DuplicateEntry(entry.key().to_owned()));
        }
        let moved = self.list.remove(entry)?;
        self.archives.add(moved)?;
        Ok(())
    }

    pub fn unarchive_entry(&mut self, entry: &Entry) -> Result<(), StoreError> {
        if self.list.contains(entry) {
            return Err(StoreError::DuplicateEntry(entry.key().to_owned()));
        }
        let moved = self.archives.remove(entry)?;
        self.list.add(moved)?;
        Ok(())
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
