//! Identity allocation and pending-change tracking

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::domain::{DomainError, DomainResult, EntriesHandle, IndirectReference};
use crate::infrastructure::traits::MutationManager;

/// Lowest object number a document may allocate; 0 heads the free list.
const FIRST_OBJECT_NUMBER: u64 = 1;

#[derive(Debug)]
struct StateInner {
    next_object_number: u64,
    changes: IndexMap<IndirectReference, EntriesHandle>,
}

/// Document-scoped identity authority.
///
/// New references always carry generation 0. The counter starts at the document's
/// trailer `/Size` and only moves forward, so an identity is never handed out twice.
#[derive(Debug)]
pub struct StateManager {
    inner: Mutex<StateInner>,
    max_object_number: u32,
}

impl StateManager {
    pub fn new(next_object_number: u32, max_object_number: u32) -> Self {
        Self {
            inner: Mutex::new(StateInner {
                next_object_number: u64::from(next_object_number).max(FIRST_OBJECT_NUMBER),
                changes: IndexMap::new(),
            }),
            max_object_number,
        }
    }

    /// Object number the next allocation will receive.
    pub fn next_object_number(&self) -> u64 {
        self.inner.lock().next_object_number
    }

    pub fn max_object_number(&self) -> u32 {
        self.max_object_number
    }

    /// Mark `object_number` as taken by a loaded object.
    ///
    /// Raises the counter past it; never moves it backwards.
    #[instrument(level = "trace", skip(self))]
    pub fn reserve(&self, object_number: u32) {
        let mut inner = self.inner.lock();
        let floor = u64::from(object_number) + 1;
        if inner.next_object_number < floor {
            debug!("reserve: counter {} -> {}", inner.next_object_number, floor);
            inner.next_object_number = floor;
        }
    }
}

impl MutationManager for StateManager {
    #[instrument(level = "trace", skip(self))]
    fn allocate_reference(&self) -> DomainResult<IndirectReference> {
        let mut inner = self.inner.lock();
        let next = inner.next_object_number;
        let object_number = u32::try_from(next)
            .ok()
            .filter(|n| *n <= self.max_object_number)
            .ok_or(DomainError::ReferenceSpaceExhausted {
                next: u32::try_from(next).unwrap_or(u32::MAX),
                limit: self.max_object_number,
            })?;
        inner.next_object_number = next + 1;
        let reference = IndirectReference::new(object_number, 0);
        debug!("allocate_reference: {}", reference);
        Ok(reference)
    }

    #[instrument(level = "trace", skip(self))]
    fn add_change(&self, reference: IndirectReference, entries: EntriesHandle) {
        self.inner.lock().changes.insert(reference, entries);
    }

    #[instrument(level = "trace", skip(self))]
    fn remove_change(&self, reference: IndirectReference) -> Option<EntriesHandle> {
        self.inner.lock().changes.shift_remove(&reference)
    }

    fn contains(&self, reference: IndirectReference) -> bool {
        self.inner.lock().changes.contains_key(&reference)
    }

    fn changed_count(&self) -> usize {
        self.inner.lock().changes.len()
    }

    fn changes_sorted(&self) -> Vec<(IndirectReference, EntriesHandle)> {
        let mut changes: Vec<_> = self
            .inner
            .lock()
            .changes
            .iter()
            .map(|(r, h)| (*r, *h))
            .collect();
        changes.sort_by_key(|(r, _)| *r);
        changes
    }
}
