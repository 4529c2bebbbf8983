//! Validate-then-commit workflows over a [`RulePolicyBackend`].

use routerrules_rules::{RawRuleInput, RouterId, Rule, RuleId, RuleValidator, ValidationError};
use routerrules_store::RulePolicyBackend;
use tracing::{debug, info, warn};

use crate::error::OperationError;
use crate::metrics;
use crate::outcome::{Removal, Removed, Reset, Submitted};

/// Applies validated rules to a per-router policy store.
///
/// Holds no state between calls besides the backend handle and the
/// validator options; every operation is one validate/commit round.
pub struct RuleManager<B: RulePolicyBackend> {
    backend: B,
    validator: RuleValidator,
}

impl<B: RulePolicyBackend> RuleManager<B> {
    /// Create a manager with the default validator (both IP families).
    pub fn new(backend: B) -> Self {
        Self::with_validator(backend, RuleValidator::default())
    }

    pub fn with_validator(backend: B, validator: RuleValidator) -> Self {
        Self { backend, validator }
    }

    /// Get a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn validator(&self) -> &RuleValidator {
        &self.validator
    }

    /// Parse and normalize raw input without touching the backend.
    pub fn validate_and_normalize(&self, raw: &RawRuleInput) -> Result<Rule, ValidationError> {
        self.validator.validate_and_normalize(raw).inspect_err(|e| {
            metrics::record_error("validate", e.kind().as_str());
        })
    }

    /// Validate `raw`, then run the replace workflow.
    ///
    /// Nothing reaches the backend when validation fails.
    pub async fn submit_rule(
        &self,
        router_id: &RouterId,
        raw: &RawRuleInput,
        rule_to_delete: Option<&RuleId>,
    ) -> Result<Submitted, OperationError> {
        let rule = self.validate_and_normalize(raw)?;
        self.submit_validated(router_id, rule, rule_to_delete).await
    }

    /// Replace workflow for an already-normalized rule.
    ///
    /// Removal of `rule_to_delete` and addition of `rule` are independent
    /// steps: a failed removal is logged and reported in the result but the
    /// addition is still attempted. A failed addition fails the operation.
    pub async fn submit_validated(
        &self,
        router_id: &RouterId,
        rule: Rule,
        rule_to_delete: Option<&RuleId>,
    ) -> Result<Submitted, OperationError> {
        let removal = match rule_to_delete {
            Some(rule_id) => Some(self.remove_step(router_id, rule_id).await),
            None => None,
        };

        if let Err(e) = self.backend.add_rule(router_id, &rule).await {
            info!(router_id = %router_id, error = %e, "failed to add router rule");
            metrics::record_error("add", e.kind().as_str());
            return Err(e.into());
        }

        metrics::record_rule_added();
        debug!(
            router_id = %router_id,
            priority = %rule.priority,
            action = %rule.action,
            "router policy action performed"
        );
        Ok(Submitted {
            router_id: router_id.clone(),
            rule,
            removal,
        })
    }

    async fn remove_step(&self, router_id: &RouterId, rule_id: &RuleId) -> Removal {
        let result = self.backend.remove_rules(router_id, Some(rule_id), false).await;
        match &result {
            Ok(()) => metrics::record_rule_removed(),
            Err(e) => {
                warn!(
                    router_id = %router_id,
                    rule_id = %rule_id,
                    error = %e,
                    "unable to delete router policy"
                );
                metrics::record_error("remove", e.kind().as_str());
            }
        }
        Removal {
            rule_id: rule_id.clone(),
            result,
        }
    }

    /// Remove one rule by id.
    pub async fn remove_rule(
        &self,
        router_id: &RouterId,
        rule_id: &RuleId,
    ) -> Result<Removed, OperationError> {
        self.remove_step(router_id, rule_id).await.result?;
        Ok(Removed {
            router_id: router_id.clone(),
            rule_id: rule_id.clone(),
        })
    }

    /// Clear every rule of a router.
    pub async fn reset_rules(&self, router_id: &RouterId) -> Result<Reset, OperationError> {
        if let Err(e) = self.backend.remove_rules(router_id, None, true).await {
            info!(router_id = %router_id, error = %e, "failed to reset router policy");
            metrics::record_error("reset", e.kind().as_str());
            return Err(e.into());
        }

        metrics::record_reset();
        debug!(router_id = %router_id, "router policy reset performed");
        Ok(Reset {
            router_id: router_id.clone(),
        })
    }
}

impl<B: RulePolicyBackend + std::fmt::Debug> std::fmt::Debug for RuleManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleManager")
            .field("backend", &self.backend)
            .field("validator", &self.validator)
            .finish()
    }
}
