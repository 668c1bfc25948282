//! Outline (bookmark) entry point and node factory for a PDF document object model.
//!
//! Every typed view takes the document's [`ObjectResolver`](infrastructure::ObjectResolver)
//! explicitly; there is no global document state.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;
