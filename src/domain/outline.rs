//! Outline (bookmark) node view

use crate::domain::{EntriesHandle, IndirectReference};

/// Catalog key naming the outline dictionary.
pub const OUTLINES_KEY: &str = "Outlines";
/// Number of visible descendants; its presence marks a usable outline root.
pub const COUNT_KEY: &str = "Count";

/// One node of the outline tree.
///
/// Holds a handle to its entries rather than a copy. The first node of a tree shares its
/// handle with the [`Outlines`](crate::application::Outlines) descriptor it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    entries: EntriesHandle,
    reference: Option<IndirectReference>,
}

impl OutlineNode {
    /// Wraps `entries` with no identity attached.
    pub fn new(entries: EntriesHandle) -> Self {
        Self {
            entries,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: Option<IndirectReference>) -> Self {
        self.reference = reference;
        self
    }

    pub fn entries(&self) -> EntriesHandle {
        self.entries
    }

    pub fn reference(&self) -> Option<IndirectReference> {
        self.reference
    }

    pub fn set_reference(&mut self, reference: Option<IndirectReference>) {
        self.reference = reference;
    }
}
