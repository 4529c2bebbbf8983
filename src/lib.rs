//! # routerrules
//!
//! Validate, normalize and commit per-router policy rules.
//!
//! ## Crates
//!
//! - [`routerrules_core`] - Shared constants and error labels
//! - [`routerrules_rules`] - Rule types and the validation pipeline
//! - [`routerrules_store`] - Rule-set backends (in-memory, HTTP)
//! - [`routerrules_manager`] - Validate-then-commit workflows
//! - [`routerrules_config`] - Configuration loading and validation

pub mod cli;

pub use routerrules_config as config;
pub use routerrules_core as core;
pub use routerrules_manager as manager;
pub use routerrules_rules as rules;
pub use routerrules_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use routerrules_config::{Config, load_config, validate_config};
    pub use routerrules_manager::{OperationError, RuleManager};
    pub use routerrules_rules::{RawRuleInput, RouterId, Rule, RuleId, RuleValidator};
    pub use routerrules_store::{MemoryBackend, RulePolicyBackend};
}
