//! Workflow tests for the rule manager.
//!
//! A recording backend captures every call so the tests can check exactly
//! what reaches the store, and in which order.
#![allow(clippy::tests_outside_test_module)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use routerrules_manager::{OperationError, RuleManager};
use routerrules_rules::{
    AddressSpecifier, ErrorKind, Field, IpVersion, RawRuleInput, RouterId, Rule, RuleId,
    RuleValidator,
};
use routerrules_store::{BackendError, MemoryBackend, RulePolicyBackend};

// ============================================================================
// Recording backend
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Add(RouterId, Rule),
    Remove(RouterId, Option<RuleId>, bool),
}

#[derive(Debug, Default)]
struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    add_error: Option<BackendError>,
    remove_error: Option<BackendError>,
}

impl RecordingBackend {
    fn failing_remove(err: BackendError) -> Self {
        Self {
            remove_error: Some(err),
            ..Self::default()
        }
    }

    fn failing_add(err: BackendError) -> Self {
        Self {
            add_error: Some(err),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RulePolicyBackend for RecordingBackend {
    async fn add_rule(&self, router_id: &RouterId, rule: &Rule) -> Result<(), BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Add(router_id.clone(), rule.clone()));
        self.add_error.clone().map_or(Ok(()), Err)
    }

    async fn remove_rules(
        &self,
        router_id: &RouterId,
        rule_id: Option<&RuleId>,
        reset: bool,
    ) -> Result<(), BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Remove(router_id.clone(), rule_id.cloned(), reset));
        self.remove_error.clone().map_or(Ok(()), Err)
    }
}

fn router() -> RouterId {
    RouterId::new("router-1").unwrap()
}

// ============================================================================
// submit_rule
// ============================================================================

#[tokio::test]
async fn submit_adds_normalized_rule_once() {
    let backend = Arc::new(RecordingBackend::default());
    let manager = RuleManager::new(backend.clone());

    let raw = RawRuleInput::new("permit", "0.0.0.0/0", "any")
        .with_priority("-1")
        .with_nexthops("10.0.0.1");
    let submitted = manager.submit_rule(&router(), &raw, None).await.unwrap();

    assert_eq!(submitted.rule.source, AddressSpecifier::Any);
    assert_eq!(submitted.rule.nexthops, vec!["10.0.0.1".parse::<std::net::IpAddr>().unwrap()]);
    assert!(submitted.removal.is_none());
    assert_eq!(backend.calls(), vec![Call::Add(router(), submitted.rule.clone())]);
}

#[tokio::test]
async fn validation_failure_never_reaches_backend() {
    let backend = Arc::new(RecordingBackend::default());
    let manager = RuleManager::new(backend.clone());

    let raw = RawRuleInput::new("permit", "10.0.0.5", "any");
    let err = manager
        .submit_rule(&router(), &raw, Some(&RuleId::from("5")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert!(matches!(&err, OperationError::Validation(v) if v.field() == Some(Field::Source)));

    let raw = RawRuleInput::new("permit", "any", "any").with_priority("3001");
    let err = manager.submit_rule(&router(), &raw, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn replace_reports_failed_delete_and_still_adds() {
    let backend = Arc::new(RecordingBackend::failing_remove(BackendError::NotFound(
        RuleId::from("5"),
    )));
    let manager = RuleManager::new(backend.clone());

    let raw = RawRuleInput::new("deny", "10.0.0.0/8", "external").with_nexthops("1.1.1.1");
    let submitted = manager
        .submit_rule(&router(), &raw, Some(&RuleId::from("5")))
        .await
        .unwrap();

    let removal = submitted.removal.as_ref().unwrap();
    assert!(!removal.succeeded());
    assert_eq!(removal.rule_id, RuleId::from("5"));
    assert!(submitted.removal_error().unwrap().is_not_found());
    assert!(submitted.rule.nexthops.is_empty());

    assert_eq!(
        backend.calls(),
        vec![
            Call::Remove(router(), Some(RuleId::from("5")), false),
            Call::Add(router(), submitted.rule.clone()),
        ]
    );
}

#[tokio::test]
async fn add_failure_fails_operation_after_delete() {
    let backend = Arc::new(RecordingBackend::failing_add(BackendError::Backend(
        "connection refused".into(),
    )));
    let manager = RuleManager::new(backend.clone());

    let raw = RawRuleInput::new("permit", "any", "any");
    let err = manager
        .submit_rule(&router(), &raw, Some(&RuleId::from("3")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Backend);
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn ipv4_only_manager_rejects_ipv6() {
    let backend = Arc::new(RecordingBackend::default());
    let manager = RuleManager::with_validator(backend.clone(), RuleValidator::with_ip_version(IpVersion::V4));

    let raw = RawRuleInput::new("permit", "2001:db8::/32", "any");
    manager.submit_rule(&router(), &raw, None).await.unwrap_err();
    assert!(backend.calls().is_empty());
}

// ============================================================================
// reset_rules / remove_rule
// ============================================================================

#[tokio::test]
async fn reset_calls_remove_rules_once() {
    let backend = Arc::new(RecordingBackend::default());
    let manager = RuleManager::new(backend.clone());

    let reset = manager.reset_rules(&router()).await.unwrap();
    assert_eq!(reset.router_id, router());
    assert_eq!(backend.calls(), vec![Call::Remove(router(), None, true)]);
}

#[tokio::test]
async fn reset_clears_all_rules_in_memory() {
    let manager = RuleManager::new(MemoryBackend::new());
    for priority in ["1", "2", "3", "-1", "-1"] {
        let raw = RawRuleInput::new("permit", "any", "any").with_priority(priority);
        manager.submit_rule(&router(), &raw, None).await.unwrap();
    }
    assert_eq!(manager.backend().len(&router()), 5);

    manager.reset_rules(&router()).await.unwrap();
    assert!(manager.backend().is_empty(&router()));
}

#[tokio::test]
async fn reset_failure_is_surfaced() {
    let backend = RecordingBackend::failing_remove(BackendError::Rejected("router unknown".into()));
    let manager = RuleManager::new(backend);
    let err = manager.reset_rules(&router()).await.unwrap_err();
    assert_eq!(err, OperationError::Backend(BackendError::Rejected("router unknown".into())));
}

#[tokio::test]
async fn replace_in_memory_moves_rule() {
    let manager = RuleManager::new(MemoryBackend::new());
    let raw = RawRuleInput::new("permit", "any", "10.0.0.0/8").with_priority("5");
    manager.submit_rule(&router(), &raw, None).await.unwrap();

    let raw = RawRuleInput::new("permit", "any", "10.0.0.0/8").with_priority("9");
    let submitted = manager
        .submit_rule(&router(), &raw, Some(&RuleId::from("5")))
        .await
        .unwrap();
    assert!(submitted.removal_error().is_none());

    let priorities: Vec<i32> = manager
        .backend()
        .rules(&router())
        .iter()
        .map(|r| r.priority.get())
        .collect();
    assert_eq!(priorities, vec![9]);
}

#[tokio::test]
async fn remove_missing_rule_is_not_found() {
    let manager = RuleManager::new(MemoryBackend::new());
    let err = manager
        .remove_rule(&router(), &RuleId::from("42"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn appended_rule_is_removable_by_its_assigned_slot() {
    let manager = RuleManager::new(MemoryBackend::new());
    let first = RawRuleInput::new("permit", "any", "any").with_priority("4");
    manager.submit_rule(&router(), &first, None).await.unwrap();

    let appended = RawRuleInput::new("deny", "10.0.0.0/8", "any");
    let submitted = manager.submit_rule(&router(), &appended, None).await.unwrap();
    assert!(submitted.rule.priority.is_unset());

    let stored = manager.backend().rules(&router());
    let slot = stored
        .iter()
        .find(|r| r.destination == submitted.rule.destination && r.source == submitted.rule.source)
        .map(|r| r.priority)
        .unwrap();
    assert_eq!(slot.get(), 5);

    manager.remove_rule(&router(), &RuleId::from(slot)).await.unwrap();
    assert_eq!(manager.backend().len(&router()), 1);
}
