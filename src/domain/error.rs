//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent object-model rule violations.
///
/// Lookups never produce these: malformed or missing optional fields degrade to `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("object identity space exhausted: next object number {next} exceeds limit {limit}")]
    ReferenceSpaceExhausted { next: u32, limit: u32 },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
