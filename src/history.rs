use crate::error::HistoryError;
use crate::store::EntryStore;

/// Undo/redo over full store snapshots.
///
/// The stack always holds at least the state the store was created with;
/// `cursor` points at the snapshot matching the store's current contents.
/// Committing truncates any redo tail. Depth is unbounded.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<EntryStore>,
    cursor: usize,
}

impl History {
    pub fn new(initial: EntryStore) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    pub fn commit(&mut self, state: EntryStore) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        self.cursor += 1;
    }

    pub fn undo(&mut self) -> Result<EntryStore, HistoryError> {
        if self.cursor == 0 {
            return Err(HistoryError::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(self.snapshots[self.cursor].clone())
    }

    pub fn redo(&mut self) -> Result<EntryStore, HistoryError> {
        if self.cursor + 1 >= self.snapshots.len() {
            return Err(HistoryError::NothingToRedo);
        }
        self.cursor += 1;
        Ok(self.snapshots[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(EntryStore::new())
    }
}
