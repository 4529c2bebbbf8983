//! Router policy rule validation for routerrules.
//!
//! Turns untrusted field values into a well-formed [`Rule`] through an
//! explicit pipeline: each field is parsed ([`RuleValidator::parse`]), then
//! defaults and cross-field overrides are applied ([`normalize`]).
//!
//! # Fields
//!
//! - **source / destination**: `any`, `external`, or a CIDR with a mandatory
//!   prefix length. `0.0.0.0/0` is normalized to `any`.
//! - **action**: `permit` or `deny`. `deny` always clears next hops.
//! - **nexthops**: comma-separated plain IP addresses.
//! - **priority**: optional integer in `[-1, 3000]`, default `-1`.
//!
//! # Example
//!
//! ```
//! use routerrules_rules::{RawRuleInput, validate_and_normalize};
//!
//! let raw = RawRuleInput::new("permit", "0.0.0.0/0", "10.1.0.0/16")
//!     .with_nexthops("10.0.0.1");
//! let rule = validate_and_normalize(&raw).unwrap();
//! assert_eq!(rule.source.to_string(), "any");
//! assert_eq!(rule.nexthops.len(), 1);
//! ```

pub mod address;
pub mod error;
pub mod nexthop;
pub mod priority;
pub mod rule;
pub mod validator;

pub use address::{AddressSpecifier, CIDR_REQUIRED, IpVersion, validate_address, validate_address_for};
pub use error::{ErrorKind, Field, ValidationError};
pub use nexthop::{NextHopList, split_nexthops, split_nexthops_for};
pub use priority::{Priority, validate_priority};
pub use rule::{Action, CandidateRule, RawRuleInput, Rule, RouterId, RuleId};
pub use validator::{RuleValidator, ValidatorOptions, normalize, validate_and_normalize};
