//! Tests for create_new_outline_node

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use proptest::prelude::*;

use pdf_outlines::application::{create_new_outline_node, ApplicationError, Outlines};
use pdf_outlines::config::{LimitsConfig, Settings};
use pdf_outlines::domain::{
    DictionaryEntries, DomainError, DomainResult, EntriesHandle, IndirectReference, Value,
};
use pdf_outlines::infrastructure::{
    MutationManager, ObjectLibrary, ObjectResolver, ResolvedDictionary,
};
use pdf_outlines::util::testing;

fn library_with_size(size: u32) -> ObjectLibrary {
    testing::init_test_setup();
    ObjectLibrary::new(&Settings::default(), size)
}

/// Mutation manager whose identity space is already used up
struct ExhaustedManager;

impl MutationManager for ExhaustedManager {
    fn allocate_reference(&self) -> DomainResult<IndirectReference> {
        Err(DomainError::ReferenceSpaceExhausted { next: 5, limit: 4 })
    }

    fn add_change(&self, _reference: IndirectReference, _entries: EntriesHandle) {}

    fn remove_change(&self, _reference: IndirectReference) -> Option<EntriesHandle> {
        None
    }

    fn contains(&self, _reference: IndirectReference) -> bool {
        false
    }

    fn changed_count(&self) -> usize {
        0
    }

    fn changes_sorted(&self) -> Vec<(IndirectReference, EntriesHandle)> {
        Vec::new()
    }
}

/// Resolver backed by a real library but with a failing identity authority
struct ExhaustedResolver {
    inner: ObjectLibrary,
    manager: ExhaustedManager,
}

impl ObjectResolver for ExhaustedResolver {
    fn resolve(&self, entries: EntriesHandle, key: &str) -> Option<Value> {
        self.inner.resolve(entries, key)
    }

    fn resolve_dictionary(&self, entries: EntriesHandle, key: &str) -> Option<ResolvedDictionary> {
        self.inner.resolve_dictionary(entries, key)
    }

    fn entries(&self, handle: EntriesHandle) -> Option<DictionaryEntries> {
        self.inner.entries(handle)
    }

    fn insert_entries(&self, entries: DictionaryEntries) -> EntriesHandle {
        self.inner.insert_entries(entries)
    }

    fn mutation_manager(&self) -> &dyn MutationManager {
        &self.manager
    }
}

#[test]
fn given_counter_at_47_when_creating_node_then_identity_is_47_0_and_counter_advances() {
    // Arrange
    let library = library_with_size(47);

    // Act
    let node = create_new_outline_node(&library).unwrap();

    // Assert
    assert_eq!(node.reference(), Some(IndirectReference::new(47, 0)));
    assert_eq!(library.state_manager().next_object_number(), 48);
}

#[test]
fn given_new_node_when_inspecting_then_entries_are_empty_and_detached() {
    // Arrange
    let library = library_with_size(10);

    // Act
    let node = create_new_outline_node(&library).unwrap();

    // Assert
    let entries = library.entries(node.entries()).expect("entries stored");
    assert!(entries.is_empty());
    assert!(!library.mutation_manager().contains(node.reference().unwrap()));
    assert!(!library.mutation_manager().has_changes());
    assert!(library.object(node.reference().unwrap()).is_none());
}

#[test]
fn given_new_node_when_caller_registers_it_then_pending_write_is_tracked() {
    // Arrange
    let library = library_with_size(10);
    let node = create_new_outline_node(&library).unwrap();
    let reference = node.reference().unwrap();

    // Act
    library.mutation_manager().add_change(reference, node.entries());

    // Assert
    assert!(library.mutation_manager().contains(reference));
    assert_eq!(
        library.mutation_manager().changes_sorted(),
        vec![(reference, node.entries())]
    );
}

#[test]
fn given_existing_outline_when_creating_node_then_existing_objects_unchanged() {
    // Arrange
    let library = library_with_size(30);
    let mut dict = DictionaryEntries::new();
    dict.insert("Count", 2i64);
    dict.insert("First", IndirectReference::new(13, 0));
    let reference = IndirectReference::new(12, 0);
    let entries = library
        .add_object(reference, Value::Dictionary(dict.clone()))
        .unwrap();
    let outlines = Outlines::new(&library, Some(entries)).with_reference(Some(reference));
    let before = outlines.clone();

    // Act
    let node = create_new_outline_node(&library).unwrap();

    // Assert
    assert_ne!(node.entries(), entries);
    assert_eq!(library.entries(entries), Some(dict));
    assert_eq!(outlines, before);
    assert_eq!(outlines.root_node().unwrap().reference(), Some(reference));
}

#[test]
fn given_object_loaded_at_counter_when_creating_node_then_identity_skips_it() {
    // Arrange
    let library = library_with_size(5);
    let loaded = IndirectReference::new(5, 0);
    library.add_object(loaded, Value::Dictionary(DictionaryEntries::new()));

    // Act
    let node = create_new_outline_node(&library).unwrap();

    // Assert
    assert_ne!(node.reference(), Some(loaded));
    assert_eq!(node.reference(), Some(IndirectReference::new(6, 0)));
}

#[test]
fn given_objects_loaded_beyond_size_when_creating_nodes_then_no_identity_collides() {
    // Arrange
    let library = library_with_size(3);
    let loaded: HashSet<IndirectReference> = [3, 4, 20]
        .into_iter()
        .map(|n| IndirectReference::new(n, 0))
        .collect();
    for reference in &loaded {
        library.add_object(*reference, Value::Integer(1));
    }

    // Act
    let created: Vec<IndirectReference> = (0..10)
        .map(|_| create_new_outline_node(&library).unwrap().reference().unwrap())
        .collect();

    // Assert
    assert!(created.iter().all(|r| !loaded.contains(r)));
    assert_eq!(created[0], IndirectReference::new(21, 0));
}

#[test]
fn given_many_calls_when_creating_nodes_then_identities_are_distinct() {
    let library = library_with_size(1);

    let references: HashSet<IndirectReference> = (0..500)
        .map(|_| create_new_outline_node(&library).unwrap().reference().unwrap())
        .collect();

    assert_eq!(references.len(), 500);
}

#[test]
fn given_concurrent_callers_when_creating_nodes_then_identities_never_collide() {
    // Arrange
    let library = Arc::new(library_with_size(1));

    // Act
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let library = Arc::clone(&library);
            thread::spawn(move || {
                (0..200)
                    .map(|_| {
                        create_new_outline_node(library.as_ref())
                            .unwrap()
                            .reference()
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    let all: Vec<IndirectReference> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    // Assert
    let unique: HashSet<_> = all.iter().copied().collect();
    assert_eq!(all.len(), 1600);
    assert_eq!(unique.len(), 1600);
    assert_eq!(library.state_manager().next_object_number(), 1601);
}

#[test]
fn given_identity_space_exhausted_when_creating_node_then_error_propagates() {
    // Arrange
    let settings = Settings {
        limits: LimitsConfig {
            max_object_number: 3,
            ..LimitsConfig::default()
        },
        ..Settings::default()
    };
    let library = ObjectLibrary::new(&settings, 3);
    create_new_outline_node(&library).unwrap();

    // Act
    let result = create_new_outline_node(&library);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::ReferenceSpaceExhausted { next: 4, limit: 3 }))
    ));
}

#[test]
fn given_failing_manager_when_creating_node_then_domain_error_unchanged() {
    // Arrange
    let resolver = ExhaustedResolver {
        inner: library_with_size(1),
        manager: ExhaustedManager,
    };

    // Act
    let err = create_new_outline_node(&resolver).unwrap_err();

    // Assert
    match err {
        ApplicationError::Domain(e) => {
            assert_eq!(e, DomainError::ReferenceSpaceExhausted { next: 5, limit: 4 })
        }
        other => panic!("unexpected error: {other}"),
    }
}

proptest! {
    #[test]
    fn prop_new_nodes_start_at_size_and_never_repeat(size in 1u32..100_000, calls in 1usize..64) {
        let library = ObjectLibrary::new(&Settings::default(), size);

        let numbers: Vec<u32> = (0..calls)
            .map(|_| create_new_outline_node(&library).unwrap().reference().unwrap().object_number)
            .collect();

        let expected: Vec<u32> = (size..size + calls as u32).collect();
        prop_assert_eq!(numbers, expected);
    }
}
