//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Domain errors represent misuse of the tree API.
///
/// Navigation misses are not errors: they come back as `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node is not an element: {0}")]
    NotAnElement(NodeId),

    #[error("child index {index} out of range (child count {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
