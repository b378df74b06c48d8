use crate::io::store::{Store, UNDO_KEY};
use crate::model::undo::UndoEntry;

/// Entries beyond this cap are silently dropped, oldest first
pub const UNDO_LOG_LIMIT: usize = 20;

/// Bounded LIFO of reversible operations, most recent first, persisted
/// to its own storage slot on every mutation.
pub struct UndoLog {
    store: Store,
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    /// Load the log from its storage slot. Missing or corrupt data
    /// yields an empty log.
    pub fn load(store: Store) -> UndoLog {
        let entries = store.load(UNDO_KEY, Vec::new());
        UndoLog { store, entries }
    }

    pub fn entries(&self) -> &[UndoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend an entry, dropping the oldest beyond the cap.
    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(UNDO_LOG_LIMIT);
        self.persist();
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let entry = self.entries.remove(0);
        self.persist();
        Some(entry)
    }

    fn persist(&self) {
        // Best-effort write-through
        let _ = self.store.save(UNDO_KEY, &self.entries);
    }
}
