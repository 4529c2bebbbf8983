//! Rule-set backend trait.

use std::sync::Arc;

use async_trait::async_trait;
use routerrules_rules::{RouterId, Rule, RuleId};

use crate::error::BackendError;

/// Per-router rule store.
///
/// Implementations must be thread-safe (`Send + Sync`); the manager may be
/// shared between tasks even though each operation is a single
/// request/response.
#[async_trait]
pub trait RulePolicyBackend: Send + Sync {
    /// Upsert `rule` into the router's rule set, keyed by priority.
    ///
    /// Either the rule set reflects the new rule or it is unchanged.
    async fn add_rule(&self, router_id: &RouterId, rule: &Rule) -> Result<(), BackendError>;

    /// Remove rules from the router's rule set.
    ///
    /// With `reset` every rule is cleared and `rule_id` is ignored.
    /// Otherwise the rule identified by `rule_id` is removed; a missing rule
    /// fails with [`BackendError::NotFound`].
    async fn remove_rules(
        &self,
        router_id: &RouterId,
        rule_id: Option<&RuleId>,
        reset: bool,
    ) -> Result<(), BackendError>;
}

/// Blanket implementation for `Arc<B>` where `B: RulePolicyBackend`.
#[async_trait]
impl<B: RulePolicyBackend + ?Sized> RulePolicyBackend for Arc<B> {
    #[inline]
    async fn add_rule(&self, router_id: &RouterId, rule: &Rule) -> Result<(), BackendError> {
        (**self).add_rule(router_id, rule).await
    }

    #[inline]
    async fn remove_rules(
        &self,
        router_id: &RouterId,
        rule_id: Option<&RuleId>,
        reset: bool,
    ) -> Result<(), BackendError> {
        (**self).remove_rules(router_id, rule_id, reset).await
    }
}

/// Blanket implementation for `Box<B>` where `B: RulePolicyBackend`.
#[async_trait]
impl<B: RulePolicyBackend + ?Sized> RulePolicyBackend for Box<B> {
    #[inline]
    async fn add_rule(&self, router_id: &RouterId, rule: &Rule) -> Result<(), BackendError> {
        (**self).add_rule(router_id, rule).await
    }

    #[inline]
    async fn remove_rules(
        &self,
        router_id: &RouterId,
        rule_id: Option<&RuleId>,
        reset: bool,
    ) -> Result<(), BackendError> {
        (**self).remove_rules(router_id, rule_id, reset).await
    }
}
