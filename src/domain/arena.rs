use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::DictionaryEntries;

/// Copyable handle to one `DictionaryEntries` slot in an [`EntriesStore`].
///
/// Typed views (outline descriptor, outline node, catalog) hold a handle rather than
/// the entries themselves, so two views built over the same slot compare equal here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntriesHandle(Index);

/// Arena storage for every dictionary loaded into or created in a document.
///
/// Uses a generational arena so a handle to a removed slot never aliases a later insert.
#[derive(Debug, Default)]
pub struct EntriesStore {
    arena: Arena<DictionaryEntries>,
}

impl EntriesStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    #[instrument(level = "trace", skip(self, entries))]
    pub fn insert(&mut self, entries: DictionaryEntries) -> EntriesHandle {
        EntriesHandle(self.arena.insert(entries))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, handle: EntriesHandle) -> Option<&DictionaryEntries> {
        self.arena.get(handle.0)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_mut(&mut self, handle: EntriesHandle) -> Option<&mut DictionaryEntries> {
        self.arena.get_mut(handle.0)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, handle: EntriesHandle) -> Option<DictionaryEntries> {
        self.arena.remove(handle.0)
    }

    pub fn contains(&self, handle: EntriesHandle) -> bool {
        self.arena.contains(handle.0)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
