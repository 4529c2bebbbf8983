//! Parse -> normalize pipeline turning raw input into a [`Rule`].

use crate::address::{AddressSpecifier, IpVersion, validate_address_for};
use crate::error::{Field, ValidationError};
use crate::nexthop::{NextHopList, split_nexthops_for};
use crate::priority::validate_priority;
use crate::rule::{Action, CandidateRule, RawRuleInput, Rule};

/// Options controlling what the validator accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// IP family accepted in CIDRs and next hops. Keywords are always accepted.
    pub ip_version: IpVersion,
}

/// Validates raw rule input.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator {
    options: ValidatorOptions,
}

impl RuleValidator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn with_ip_version(ip_version: IpVersion) -> Self {
        Self::new(ValidatorOptions { ip_version })
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn validate_address(&self, raw: &str) -> Result<AddressSpecifier, ValidationError> {
        validate_address_for(raw, self.options.ip_version)
    }

    pub fn split_nexthops(&self, raw: &str) -> Result<NextHopList, ValidationError> {
        split_nexthops_for(raw, self.options.ip_version)
    }

    /// Parse every field, in form order, without applying defaults.
    ///
    /// Fails on the first invalid field; the error names that field.
    pub fn parse(&self, raw: &RawRuleInput) -> Result<CandidateRule, ValidationError> {
        let priority = match raw.priority.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => {
                Some(validate_priority(Some(p)).map_err(|e| e.in_field(Field::Priority))?)
            }
            _ => None,
        };
        let source = self
            .validate_address(&raw.source)
            .map_err(|e| e.in_field(Field::Source))?;
        let destination = self
            .validate_address(&raw.destination)
            .map_err(|e| e.in_field(Field::Destination))?;
        let action: Action = raw.action.parse().map_err(|e: ValidationError| e.in_field(Field::Action))?;
        let nexthops = raw
            .nexthops
            .as_deref()
            .map(|n| self.split_nexthops(n))
            .transpose()
            .map_err(|e| e.in_field(Field::Nexthops))?;

        Ok(CandidateRule {
            priority,
            action,
            source,
            destination,
            nexthops,
        })
    }

    /// Parse then normalize.
    pub fn validate_and_normalize(&self, raw: &RawRuleInput) -> Result<Rule, ValidationError> {
        self.parse(raw).map(normalize)
    }
}

/// Apply defaults and cross-field overrides. Never fails.
///
/// In order: priority defaults to -1, next hops default to empty,
/// `0.0.0.0/0` becomes `any` for source then destination, and `deny`
/// clears next hops even when some were supplied.
pub fn normalize(candidate: CandidateRule) -> Rule {
    let priority = candidate.priority.unwrap_or_default();
    let mut nexthops = candidate.nexthops.unwrap_or_default();
    let source = candidate.source.normalized();
    let destination = candidate.destination.normalized();
    if candidate.action.is_deny() {
        nexthops.clear();
    }

    Rule {
        priority,
        action: candidate.action,
        source,
        destination,
        nexthops,
    }
}

/// Validate and normalize with default options (both IP families).
pub fn validate_and_normalize(raw: &RawRuleInput) -> Result<Rule, ValidationError> {
    RuleValidator::default().validate_and_normalize(raw)
}
