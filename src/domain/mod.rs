//! Domain layer: object-model values and typed views
//!
//! This layer is independent of external concerns (no resolution, no allocation, no config loading).

pub mod arena;
pub mod entries;
pub mod error;
pub mod outline;
pub mod reference;

pub use arena::{EntriesHandle, EntriesStore};
pub use entries::{DictionaryEntries, Name, Value};
pub use error::{DomainError, DomainResult};
pub use outline::{OutlineNode, COUNT_KEY, OUTLINES_KEY};
pub use reference::IndirectReference;
