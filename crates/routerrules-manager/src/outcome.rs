//! Success values returned by [`RuleManager`](crate::RuleManager).

use routerrules_rules::{RouterId, Rule, RuleId};
use routerrules_store::BackendError;

/// Result of the best-effort removal step of a replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub rule_id: RuleId,
    pub result: Result<(), BackendError>,
}

impl Removal {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// A rule was committed.
///
/// When the submission also asked for an old rule to be deleted, the outcome
/// of that step is kept here whether or not it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub router_id: RouterId,
    /// The normalized rule sent to the backend.
    ///
    /// An unset priority (`-1`) is reported as sent; the backend picks the
    /// slot. With [`MemoryBackend`](routerrules_store::MemoryBackend) that
    /// slot, and therefore the rule id, is visible through its `rules()`.
    pub rule: Rule,
    pub removal: Option<Removal>,
}

impl Submitted {
    /// Error of the removal step, if one was attempted and failed.
    pub fn removal_error(&self) -> Option<&BackendError> {
        self.removal.as_ref().and_then(|r| r.result.as_ref().err())
    }
}

/// A single rule was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub router_id: RouterId,
    pub rule_id: RuleId,
}

/// Every rule of a router was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reset {
    pub router_id: RouterId,
}
