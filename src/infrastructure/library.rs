//! In-memory object library: the document's resolution cache
//!
//! Holds every loaded indirect object and the entries store behind all dictionaries.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use crate::config::Settings;
use crate::domain::{
    DictionaryEntries, EntriesHandle, EntriesStore, IndirectReference, Name, Value,
};
use crate::infrastructure::state::StateManager;
use crate::infrastructure::traits::{MutationManager, ObjectResolver, ResolvedDictionary};

/// An indirect object as cached by the library.
#[derive(Debug, Clone)]
enum StoredObject {
    Dictionary(EntriesHandle),
    Direct(Value),
}

/// Outcome of following a value through indirect references.
enum Chased {
    Dictionary {
        entries: EntriesHandle,
        reference: IndirectReference,
    },
    Value(Value),
}

/// Resolution cache for one open document.
///
/// Passed explicitly to every typed view; several libraries may be live at once.
#[derive(Debug)]
pub struct ObjectLibrary {
    store: RwLock<EntriesStore>,
    objects: RwLock<HashMap<IndirectReference, StoredObject>>,
    interned: RwLock<HashMap<(EntriesHandle, Name), EntriesHandle>>,
    state: StateManager,
    max_reference_depth: usize,
}

impl ObjectLibrary {
    /// Create a library for a document whose trailer `/Size` is `size`.
    ///
    /// New identities are allocated from `size` upwards.
    pub fn new(settings: &Settings, size: u32) -> Self {
        Self {
            store: RwLock::new(EntriesStore::new()),
            objects: RwLock::new(HashMap::new()),
            interned: RwLock::new(HashMap::new()),
            state: StateManager::new(size, settings.limits.max_object_number),
            max_reference_depth: settings.limits.max_reference_depth,
        }
    }

    /// Load an indirect object into the cache.
    ///
    /// Dictionaries are moved into the entries store; their handle is returned. The
    /// object's number is reserved so later allocations never reuse it.
    #[instrument(level = "trace", skip(self, value))]
    pub fn add_object(&self, reference: IndirectReference, value: Value) -> Option<EntriesHandle> {
        let (stored, handle) = match value {
            Value::Dictionary(entries) => {
                let handle = self.store.write().insert(entries);
                (StoredObject::Dictionary(handle), Some(handle))
            }
            other => (StoredObject::Direct(other), None),
        };
        self.objects.write().insert(reference, stored);
        self.state.reserve(reference.object_number);
        handle
    }

    /// The cached object behind `reference`, dictionaries as a snapshot.
    pub fn object(&self, reference: IndirectReference) -> Option<Value> {
        let stored = self.objects.read().get(&reference).cloned()?;
        match stored {
            StoredObject::Dictionary(handle) => self.entries(handle).map(Value::Dictionary),
            StoredObject::Direct(value) => Some(value),
        }
    }

    /// The entries handle of a cached dictionary object.
    pub fn dictionary_handle(&self, reference: IndirectReference) -> Option<EntriesHandle> {
        match self.objects.read().get(&reference)? {
            StoredObject::Dictionary(handle) => Some(*handle),
            StoredObject::Direct(_) => None,
        }
    }

    pub fn state_manager(&self) -> &StateManager {
        &self.state
    }

    fn lookup(&self, entries: EntriesHandle, key: &str) -> Option<Value> {
        self.store.read().get(entries)?.get(key).cloned()
    }

    /// Follow `value` through indirect references until a direct value or a dictionary object.
    ///
    /// A dangling reference resolves to nothing, like the null object it stands for.
    fn chase(&self, value: Value) -> Option<Chased> {
        let mut current = value;
        for _ in 0..=self.max_reference_depth {
            let reference = match current {
                Value::Reference(reference) => reference,
                other => return Some(Chased::Value(other)),
            };
            match self.objects.read().get(&reference).cloned()? {
                StoredObject::Dictionary(entries) => {
                    return Some(Chased::Dictionary { entries, reference })
                }
                StoredObject::Direct(next) => current = next,
            }
        }
        warn!(
            "reference chain longer than {} levels, treating as absent",
            self.max_reference_depth
        );
        None
    }

    /// Give a direct dictionary value its own slot, once per (parent, key).
    fn intern(&self, parent: EntriesHandle, key: &str, entries: DictionaryEntries) -> EntriesHandle {
        let cache_key = (parent, Name::new(key));
        if let Some(handle) = self.interned.read().get(&cache_key) {
            return *handle;
        }
        let mut interned = self.interned.write();
        if let Some(handle) = interned.get(&cache_key) {
            return *handle;
        }
        let handle = self.store.write().insert(entries);
        interned.insert(cache_key, handle);
        handle
    }
}

impl ObjectResolver for ObjectLibrary {
    #[instrument(level = "trace", skip(self))]
    fn resolve(&self, entries: EntriesHandle, key: &str) -> Option<Value> {
        match self.chase(self.lookup(entries, key)?)? {
            Chased::Dictionary { entries, .. } => self.entries(entries).map(Value::Dictionary),
            Chased::Value(value) => Some(value),
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn resolve_dictionary(&self, entries: EntriesHandle, key: &str) -> Option<ResolvedDictionary> {
        match self.chase(self.lookup(entries, key)?)? {
            Chased::Dictionary { entries, reference } => Some(ResolvedDictionary {
                entries,
                reference: Some(reference),
            }),
            Chased::Value(Value::Dictionary(direct)) => {
                debug!("resolve_dictionary: interning direct /{}", key);
                Some(ResolvedDictionary {
                    entries: self.intern(entries, key, direct),
                    reference: None,
                })
            }
            Chased::Value(_) => None,
        }
    }

    fn entries(&self, handle: EntriesHandle) -> Option<DictionaryEntries> {
        self.store.read().get(handle).cloned()
    }

    #[instrument(level = "trace", skip(self, entries))]
    fn insert_entries(&self, entries: DictionaryEntries) -> EntriesHandle {
        self.store.write().insert(entries)
    }

    fn mutation_manager(&self) -> &dyn MutationManager {
        &self.state
    }
}
