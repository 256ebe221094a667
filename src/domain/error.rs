//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violated construction preconditions or broken
/// internal invariants of the tree build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("extraction from empty selector")]
    Underflow,

    #[error("{queue} queue full: capacity {capacity}")]
    CapacityExceeded {
        queue: &'static str,
        capacity: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("code length {depth} exceeds configured maximum {max}")]
    TreeTooDeep { depth: usize, max: usize },

    #[error("sum of frequencies does not fit in 64 bits")]
    WeightOverflow,

    #[error("node not found in tree arena")]
    UnknownNode,
}

impl DomainError {
    /// True for errors caused by caller-supplied data rather than a bug in
    /// the construction loop.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidInput(_)
                | DomainError::TreeTooDeep { .. }
                | DomainError::WeightOverflow
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
