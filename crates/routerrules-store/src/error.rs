//! Backend error types.

use routerrules_rules::{ErrorKind, RuleId};

/// Error returned by a rule-set backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The rule to delete does not exist.
    #[error("rule not found: {0}")]
    NotFound(RuleId),

    /// The store understood the request and refused it.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Store unreachable or failed (network, server error, encoding).
    #[error("backend error: {0}")]
    Backend(String),
}

impl BackendError {
    /// Create a backend error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Rejected(_) | Self::Backend(_) => ErrorKind::Backend,
        }
    }
}
