//! Rule, action and identifier type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::address::AddressSpecifier;
use crate::error::ValidationError;
use crate::nexthop::NextHopList;
use crate::priority::Priority;

/// Action to take when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Forward matching traffic, optionally through the rule's next hops.
    Permit,
    /// Drop matching traffic. Never carries next hops.
    Deny,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Permit => "permit",
            Action::Deny => "deny",
        }
    }

    /// Check if this is the `deny` action.
    pub fn is_deny(&self) -> bool {
        matches!(self, Action::Deny)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "permit" => Ok(Action::Permit),
            "deny" => Ok(Action::Deny),
            other => Err(ValidationError::invalid(format!(
                "action must be 'permit' or 'deny', got {other:?}"
            ))),
        }
    }
}

/// A validated, normalized router rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub priority: Priority,
    pub action: Action,
    pub source: AddressSpecifier,
    pub destination: AddressSpecifier,
    #[serde(default)]
    pub nexthops: NextHopList,
}

/// A rule whose fields have been parsed but whose defaults and cross-field
/// overrides have not yet been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRule {
    pub priority: Option<Priority>,
    pub action: Action,
    pub source: AddressSpecifier,
    pub destination: AddressSpecifier,
    pub nexthops: Option<NextHopList>,
}

/// Untrusted field values as submitted by a caller.
///
/// `priority` accepts a number or a string; `nexthops` accepts a
/// comma-separated string or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRuleInput {
    #[serde(default, deserialize_with = "text_or_int")]
    pub priority: Option<String>,
    pub action: String,
    pub source: String,
    pub destination: String,
    #[serde(default, deserialize_with = "text_or_list")]
    pub nexthops: Option<String>,
}

impl RawRuleInput {
    pub fn new(
        action: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            priority: None,
            action: action.into(),
            source: source.into(),
            destination: destination.into(),
            nexthops: None,
        }
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_nexthops(mut self, nexthops: impl Into<String>) -> Self {
        self.nexthops = Some(nexthops.into());
        self
    }
}

fn text_or_int<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrInt {
        Int(i64),
        Text(String),
    }

    Ok(Option::<TextOrInt>::deserialize(de)?.map(|v| match v {
        TextOrInt::Int(i) => i.to_string(),
        TextOrInt::Text(s) => s,
    }))
}

fn text_or_list<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrList {
        Text(String),
        List(Vec<String>),
    }

    Ok(Option::<TextOrList>::deserialize(de)?.map(|v| match v {
        TextOrList::Text(s) => s,
        TextOrList::List(items) => items.join(","),
    }))
}

/// Opaque identifier of the router owning a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouterId(String);

impl RouterId {
    /// Create a router id; blank ids are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::invalid("router id is empty")
                .in_field(crate::error::Field::RouterId));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RouterId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Opaque identifier of an existing rule, as understood by the backend.
///
/// The in-memory backend identifies rules by their decimal priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RuleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Priority> for RuleId {
    fn from(value: Priority) -> Self {
        Self(value.to_string())
    }
}
