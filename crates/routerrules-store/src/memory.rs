//! In-memory rule-set backend.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use routerrules_rules::{Priority, RouterId, Rule, RuleId};

use crate::error::BackendError;
use crate::traits::RulePolicyBackend;

type RuleSet = BTreeMap<Priority, Rule>;

/// In-process rule store, one ordered rule set per router.
///
/// Rules are keyed by priority: adding at an occupied priority replaces the
/// existing rule. A rule with the unset priority (`-1`) is appended at the
/// slot after the highest occupied one. Rule ids are decimal priorities.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    routers: RwLock<HashMap<RouterId, RuleSet>>,
}

impl MemoryBackend {
    /// Create a new empty backend.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with rules for one router.
    ///
    /// Rules go through the same upsert/append path as [`add_rule`](RulePolicyBackend::add_rule).
    pub fn with_rules<I>(router_id: &RouterId, rules: I) -> Result<Self, BackendError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let backend = Self::new();
        {
            let mut routers = backend.routers.write();
            let set = routers.entry(router_id.clone()).or_default();
            for rule in rules {
                Self::upsert(set, rule)?;
            }
        }
        Ok(backend)
    }

    /// Rules of a router in priority order.
    pub fn rules(&self, router_id: &RouterId) -> Vec<Rule> {
        self.routers
            .read()
            .get(router_id)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of rules for a router.
    #[inline]
    pub fn len(&self, router_id: &RouterId) -> usize {
        self.routers.read().get(router_id).map_or(0, BTreeMap::len)
    }

    /// Check if a router has no rules.
    #[inline]
    pub fn is_empty(&self, router_id: &RouterId) -> bool {
        self.len(router_id) == 0
    }

    /// Next free slot after the highest occupied priority.
    fn append_slot(set: &RuleSet) -> Result<Priority, BackendError> {
        let next = set
            .last_key_value()
            .map_or(0, |(p, _)| i64::from(p.get()) + 1);
        Priority::new(next.max(0))
            .map_err(|_| BackendError::Rejected("rule set is full: no priority left to append".into()))
    }

    fn upsert(set: &mut RuleSet, mut rule: Rule) -> Result<Priority, BackendError> {
        if rule.priority.is_unset() {
            rule.priority = Self::append_slot(set)?;
        }
        let priority = rule.priority;
        set.insert(priority, rule);
        Ok(priority)
    }
}

#[async_trait]
impl RulePolicyBackend for MemoryBackend {
    async fn add_rule(&self, router_id: &RouterId, rule: &Rule) -> Result<(), BackendError> {
        let mut routers = self.routers.write();
        let set = routers.entry(router_id.clone()).or_default();
        let priority = Self::upsert(set, rule.clone())?;
        tracing::debug!(router_id = %router_id, priority = %priority, "rule stored");
        Ok(())
    }

    async fn remove_rules(
        &self,
        router_id: &RouterId,
        rule_id: Option<&RuleId>,
        reset: bool,
    ) -> Result<(), BackendError> {
        let mut routers = self.routers.write();
        if reset {
            let cleared = routers.remove(router_id).map_or(0, |set| set.len());
            tracing::debug!(router_id = %router_id, cleared, "rule set reset");
            return Ok(());
        }

        let rule_id = rule_id
            .ok_or_else(|| BackendError::Rejected("no rule id given and reset not requested".into()))?;
        let priority = rule_id
            .as_str()
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|p| Priority::new(p).ok())
            .ok_or_else(|| BackendError::NotFound(rule_id.clone()))?;

        let removed = routers
            .get_mut(router_id)
            .and_then(|set| set.remove(&priority));
        match removed {
            Some(_) => Ok(()),
            None => Err(BackendError::NotFound(rule_id.clone())),
        }
    }
}
