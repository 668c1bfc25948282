//! Document catalog: the root of the object graph

use tracing::{debug, instrument};

use crate::application::Outlines;
use crate::domain::{EntriesHandle, IndirectReference, OUTLINES_KEY};
use crate::infrastructure::traits::ObjectResolver;

/// The document catalog dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    entries: EntriesHandle,
    reference: Option<IndirectReference>,
}

impl Catalog {
    pub fn new(entries: EntriesHandle, reference: Option<IndirectReference>) -> Self {
        Self { entries, reference }
    }

    pub fn entries(&self) -> EntriesHandle {
        self.entries
    }

    pub fn reference(&self) -> Option<IndirectReference> {
        self.reference
    }

    /// Resolves the optional `/Outlines` entry.
    ///
    /// None means the document has no outline: the key is missing, dangles, or does not
    /// lead to a dictionary. The descriptor takes the reference the dictionary was
    /// reached by, or none for a direct dictionary.
    #[instrument(level = "debug", skip(library))]
    pub fn outlines(&self, library: &dyn ObjectResolver) -> Option<Outlines> {
        let resolved = library.resolve_dictionary(self.entries, OUTLINES_KEY);
        debug!("Catalog::outlines: {:?}", resolved);
        let resolved = resolved?;
        Some(Outlines::new(library, Some(resolved.entries)).with_reference(resolved.reference))
    }
}
