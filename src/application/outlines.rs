//! Document outline entry point and outline node factory
//!
//! The outline is an optional part of a document, reachable from the catalog. It is a
//! tree of outline items (bookmarks). [`Outlines`] does not build the tree; it only
//! hands out the first node, which callers walk further.

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{DictionaryEntries, EntriesHandle, IndirectReference, OutlineNode, COUNT_KEY};
use crate::infrastructure::traits::ObjectResolver;

/// The outline dictionary of a document.
///
/// Built once when the catalog is resolved and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outlines {
    entries: Option<EntriesHandle>,
    count: Option<i64>,
    reference: Option<IndirectReference>,
}

impl Outlines {
    /// Creates the descriptor over `entries`.
    ///
    /// Reads the optional `/Count` field once; a missing or non-integer value leaves the
    /// count unset. No value range is enforced: 0 and negative counts are kept.
    #[instrument(level = "trace", skip(library))]
    pub fn new(library: &dyn ObjectResolver, entries: Option<EntriesHandle>) -> Self {
        let count = entries.and_then(|handle| library.resolve_int(handle, COUNT_KEY));
        debug!("Outlines::new: entries={:?} count={:?}", entries, count);
        Self {
            entries,
            count,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: Option<IndirectReference>) -> Self {
        self.reference = reference;
        self
    }

    pub fn entries(&self) -> Option<EntriesHandle> {
        self.entries
    }

    pub fn count(&self) -> Option<i64> {
        self.count
    }

    pub fn reference(&self) -> Option<IndirectReference> {
        self.reference
    }

    /// Gets the first outline node, which can be traversed to build the whole hierarchy.
    ///
    /// Returns None when no usable `/Count` was found, whether or not there were entries
    /// at all. The node views the same entries as this descriptor and carries its
    /// reference. Every call returns a new wrapper.
    pub fn root_node(&self) -> Option<OutlineNode> {
        self.count
            .and(self.entries)
            .map(|entries| OutlineNode::new(entries).with_reference(self.reference))
    }
}

/// Creates a detached outline node with a freshly allocated identity.
///
/// The node has empty entries and no links. It is neither reachable from the document
/// nor registered with the mutation manager; the caller links it into the tree and calls
/// [`MutationManager::add_change`](crate::infrastructure::traits::MutationManager::add_change).
///
/// # Errors
/// Propagates the mutation manager's allocation failure unchanged.
#[instrument(level = "debug", skip(library))]
pub fn create_new_outline_node(library: &dyn ObjectResolver) -> ApplicationResult<OutlineNode> {
    let reference = library.mutation_manager().allocate_reference()?;
    let entries = library.insert_entries(DictionaryEntries::new());
    debug!("create_new_outline_node: {} -> {:?}", reference, entries);
    Ok(OutlineNode::new(entries).with_reference(Some(reference)))
}
