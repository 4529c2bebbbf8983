//! Operation error types.

use routerrules_rules::{ErrorKind, ValidationError};
use routerrules_store::BackendError;

/// Failure of a manager operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// Input rejected before any backend call.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// The backend failed the committing step.
    #[error("{0}")]
    Backend(#[from] BackendError),
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OperationError::Validation(e) => e.kind(),
            OperationError::Backend(e) => e.kind(),
        }
    }
}
