//! Rule management workflows for routerrules.
//!
//! [`RuleManager`] composes the validator from `routerrules-rules` with a
//! [`RulePolicyBackend`](routerrules_store::RulePolicyBackend):
//!
//! - [`submit_rule`](RuleManager::submit_rule): validate, optionally delete
//!   an old rule (best effort), then add the new one
//! - [`reset_rules`](RuleManager::reset_rules): clear a router's rule set
//! - [`remove_rule`](RuleManager::remove_rule): delete a single rule
//!
//! # Example
//!
//! ```
//! use routerrules_manager::RuleManager;
//! use routerrules_rules::{RawRuleInput, RouterId, RuleId};
//! use routerrules_store::MemoryBackend;
//!
//! # async fn example() -> Result<(), routerrules_manager::OperationError> {
//! let manager = RuleManager::new(MemoryBackend::new());
//! let router = RouterId::new("router-1")?;
//!
//! let raw = RawRuleInput::new("permit", "0.0.0.0/0", "any").with_nexthops("10.0.0.1");
//! let submitted = manager.submit_rule(&router, &raw, Some(&RuleId::from("5"))).await?;
//! // Rule 5 did not exist; the add still went through.
//! assert!(submitted.removal_error().is_some());
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
pub mod metrics;
mod outcome;

pub use error::OperationError;
pub use manager::RuleManager;
pub use outcome::{Removal, Removed, Reset, Submitted};
