//! Indirect references: object identity within a document

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an object in the document's object graph, and the key used to load it lazily.
///
/// Ordering is by object number, then generation, which is the order an incremental
/// writer emits objects in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndirectReference {
    pub object_number: u32,
    pub generation: u16,
}

impl IndirectReference {
    pub fn new(object_number: u32, generation: u16) -> Self {
        Self {
            object_number,
            generation,
        }
    }
}

impl fmt::Display for IndirectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.object_number, self.generation)
    }
}

impl From<(u32, u16)> for IndirectReference {
    fn from((object_number, generation): (u32, u16)) -> Self {
        Self::new(object_number, generation)
    }
}
