//! Infrastructure layer: resolution cache and identity authority
//!
//! This layer implements the object-graph boundary traits.

pub mod library;
pub mod state;
pub mod traits;

pub use library::ObjectLibrary;
pub use state::StateManager;
pub use traits::{MutationManager, ObjectResolver, ResolvedDictionary};
