//! Metric names and recording helpers.
//!
//! Counters are emitted through the `metrics` facade; they are no-ops until
//! the embedding application installs a recorder.

use metrics::counter;

/// Total number of rules committed.
pub const RULES_ADDED_TOTAL: &str = "routerrules_rules_added_total";
/// Total number of single-rule removals that succeeded.
pub const RULES_REMOVED_TOTAL: &str = "routerrules_rules_removed_total";
/// Total number of rule-set resets.
pub const RULE_RESETS_TOTAL: &str = "routerrules_resets_total";
/// Total number of failed operations by step and error kind.
pub const ERRORS_TOTAL: &str = "routerrules_errors_total";

#[inline]
pub fn record_rule_added() {
    counter!(RULES_ADDED_TOTAL).increment(1);
}

#[inline]
pub fn record_rule_removed() {
    counter!(RULES_REMOVED_TOTAL).increment(1);
}

#[inline]
pub fn record_reset() {
    counter!(RULE_RESETS_TOTAL).increment(1);
}

/// Record an error (step: "validate", "remove", "add", "reset").
#[inline]
pub fn record_error(step: &'static str, kind: &'static str) {
    counter!(ERRORS_TOTAL, "step" => step, "kind" => kind).increment(1);
}
