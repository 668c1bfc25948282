//! Object-graph boundary traits
//!
//! These traits abstract the document's resolution cache and identity authority,
//! allowing typed views to be tested with mock implementations.

use crate::domain::{DictionaryEntries, DomainResult, EntriesHandle, IndirectReference, Value};

/// A dictionary reached through a lookup, with the identity it was reached by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDictionary {
    /// Slot holding the dictionary's entries
    pub entries: EntriesHandle,
    /// Reference the dictionary was loaded through, None for a direct (inline) dictionary
    pub reference: Option<IndirectReference>,
}

/// Dereferences indirect references and exposes typed field lookups.
///
/// Lookups are tolerant: a missing key, a dangling reference or a value of the wrong type
/// yields `None`, never an error.
pub trait ObjectResolver: Send + Sync {
    /// Look up `key` in `entries`, following indirect references.
    fn resolve(&self, entries: EntriesHandle, key: &str) -> Option<Value>;

    /// Look up an integer field. Reals and every other type yield None.
    fn resolve_int(&self, entries: EntriesHandle, key: &str) -> Option<i64> {
        self.resolve(entries, key).and_then(|v| v.as_integer())
    }

    /// Look up a dictionary-valued field, keeping the reference it was reached by.
    fn resolve_dictionary(&self, entries: EntriesHandle, key: &str) -> Option<ResolvedDictionary>;

    /// Snapshot of the entries behind `handle`.
    fn entries(&self, handle: EntriesHandle) -> Option<DictionaryEntries>;

    /// Store new entries and return their handle.
    fn insert_entries(&self, entries: DictionaryEntries) -> EntriesHandle;

    /// The identity authority for this document.
    fn mutation_manager(&self) -> &dyn MutationManager;
}

/// Allocates object identities and tracks pending incremental writes.
pub trait MutationManager: Send + Sync {
    /// Hand out an identity never seen before in this session.
    ///
    /// Implementations must serialize this across threads.
    fn allocate_reference(&self) -> DomainResult<IndirectReference>;

    /// Register `entries` as a pending write under `reference`, replacing any earlier change.
    fn add_change(&self, reference: IndirectReference, entries: EntriesHandle);

    /// Drop a pending write.
    fn remove_change(&self, reference: IndirectReference) -> Option<EntriesHandle>;

    /// Whether `reference` has a pending write.
    fn contains(&self, reference: IndirectReference) -> bool;

    /// Whether any write is pending.
    fn has_changes(&self) -> bool {
        self.changed_count() > 0
    }

    fn changed_count(&self) -> usize;

    /// Pending writes ordered by object number, the order an incremental update emits them.
    fn changes_sorted(&self) -> Vec<(IndirectReference, EntriesHandle)>;
}
