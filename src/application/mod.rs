//! Application layer: typed views that resolve through the object graph
//!
//! This layer orchestrates domain values and depends on the resolver boundary traits.

pub mod catalog;
pub mod error;
pub mod outlines;

pub use catalog::Catalog;
pub use error::{ApplicationError, ApplicationResult};
pub use outlines::{create_new_outline_node, Outlines};
