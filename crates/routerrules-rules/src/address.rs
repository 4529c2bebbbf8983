//! Address specifiers: reserved keywords or CIDR networks.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use routerrules_core::{KEYWORD_ANY, KEYWORD_EXTERNAL, MATCH_ALL_CIDR};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Message returned when a non-keyword value lacks a prefix length.
pub const CIDR_REQUIRED: &str = "Input must be in CIDR format";

/// Source or destination of a rule.
///
/// A CIDR keeps the address as written; host bits are not masked off, so
/// `10.0.0.5/24` stays `10.0.0.5/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AddressSpecifier {
    /// The `any` keyword.
    Any,
    /// The `external` keyword.
    External,
    /// An address with a mandatory prefix length.
    Cidr(IpNet),
}

impl AddressSpecifier {
    pub fn is_keyword(&self) -> bool {
        !matches!(self, AddressSpecifier::Cidr(_))
    }

    /// `0.0.0.0/0` collapses to `any`; everything else is unchanged.
    pub fn normalized(self) -> Self {
        match self {
            AddressSpecifier::Cidr(net) if net.to_string() == MATCH_ALL_CIDR => {
                AddressSpecifier::Any
            }
            other => other,
        }
    }
}

impl fmt::Display for AddressSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressSpecifier::Any => f.write_str(KEYWORD_ANY),
            AddressSpecifier::External => f.write_str(KEYWORD_EXTERNAL),
            AddressSpecifier::Cidr(net) => fmt::Display::fmt(net, f),
        }
    }
}

impl FromStr for AddressSpecifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_address(s)
    }
}

impl TryFrom<String> for AddressSpecifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_address(&value)
    }
}

impl From<AddressSpecifier> for String {
    fn from(value: AddressSpecifier) -> Self {
        value.to_string()
    }
}

/// IP families accepted by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpVersion {
    #[default]
    Any,
    V4,
    V6,
}

impl IpVersion {
    pub fn allows(&self, addr: &IpAddr) -> bool {
        match self {
            IpVersion::Any => true,
            IpVersion::V4 => addr.is_ipv4(),
            IpVersion::V6 => addr.is_ipv6(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IpVersion::Any => "any",
            IpVersion::V4 => "ipv4",
            IpVersion::V6 => "ipv6",
        }
    }
}

impl FromStr for IpVersion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(IpVersion::Any),
            "ipv4" | "v4" | "4" => Ok(IpVersion::V4),
            "ipv6" | "v6" | "6" => Ok(IpVersion::V6),
            other => Err(ValidationError::invalid(format!(
                "unknown ip version: {other}"
            ))),
        }
    }
}

/// Parse a source/destination field accepting either family.
///
/// Keywords are matched before any CIDR parsing is attempted.
pub fn validate_address(raw: &str) -> Result<AddressSpecifier, ValidationError> {
    validate_address_for(raw, IpVersion::Any)
}

/// Parse a source/destination field restricted to `version`.
pub fn validate_address_for(
    raw: &str,
    version: IpVersion,
) -> Result<AddressSpecifier, ValidationError> {
    let value = raw.trim();
    if value == KEYWORD_ANY {
        return Ok(AddressSpecifier::Any);
    }
    if value == KEYWORD_EXTERNAL {
        return Ok(AddressSpecifier::External);
    }
    if !value.contains('/') {
        return Err(ValidationError::invalid(CIDR_REQUIRED));
    }

    let net = parse_cidr(value)?;
    if !version.allows(&net.addr()) {
        return Err(ValidationError::invalid(format!(
            "{value}: not an {} network",
            version.as_str()
        )));
    }
    Ok(AddressSpecifier::Cidr(net))
}

/// Strict `addr/len` parsing: no leading zeros in IPv4 octets or in the
/// prefix length, so an accepted IPv4 CIDR prints back exactly as typed.
/// IPv6 text is canonicalized (`2001:DB8::/32` prints as `2001:db8::/32`).
fn parse_cidr(value: &str) -> Result<IpNet, ValidationError> {
    let (addr, len) = value
        .split_once('/')
        .ok_or_else(|| ValidationError::invalid(CIDR_REQUIRED))?;
    let addr: IpAddr = addr
        .parse()
        .map_err(|e| ValidationError::invalid(format!("{value}: {e}")))?;
    let digits_only = !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (len.len() > 1 && len.starts_with('0')) {
        return Err(ValidationError::invalid(format!(
            "{value}: invalid prefix length {len:?}"
        )));
    }
    let len: u8 = len.parse().map_err(|_| {
        ValidationError::invalid(format!("{value}: invalid prefix length {len:?}"))
    })?;
    IpNet::new(addr, len).map_err(|e| ValidationError::invalid(format!("{value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn keywords_skip_cidr_parsing() {
        assert_eq!(validate_address("any").unwrap(), AddressSpecifier::Any);
        assert_eq!(
            validate_address("external").unwrap(),
            AddressSpecifier::External
        );
        // Keywords are accepted even when the family is restricted.
        assert_eq!(
            validate_address_for("any", IpVersion::V6).unwrap(),
            AddressSpecifier::Any
        );
    }

    #[test]
    fn bare_ip_requires_mask() {
        let err = validate_address("10.0.0.5").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.to_string(), CIDR_REQUIRED);
    }

    #[test]
    fn non_keyword_words_require_mask() {
        for raw in ["ANY", "anything", "internal", ""] {
            let err = validate_address(raw).unwrap_err();
            assert_eq!(err.to_string(), CIDR_REQUIRED, "input {raw:?}");
        }
    }

    #[test]
    fn valid_cidrs_round_trip() {
        for raw in [
            "10.0.0.0/8",
            "192.168.1.0/24",
            "10.0.0.5/24",
            "1.2.3.4/32",
            "2001:db8::/32",
            "::1/128",
        ] {
            let addr = validate_address(raw).unwrap();
            assert!(!addr.is_keyword());
            assert_eq!(addr.to_string(), raw);
        }
    }

    #[test]
    fn malformed_cidrs_rejected() {
        for raw in ["10.0.0.0/33", "10.0.0/24", "300.1.1.1/8", "10.0.0.0/", "/24", "any/8"] {
            let err = validate_address(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "input {raw:?}");
        }
    }

    #[test]
    fn leading_zeros_rejected() {
        for raw in ["000.0.0.0/0", "0.0.0.0/00", "010.0.0.0/8", "10.0.0.0/08", "10.0.0.0/+8"] {
            let err = validate_address(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "input {raw:?}");
        }
    }

    #[test]
    fn ipv6_is_canonicalized() {
        let addr = validate_address("2001:DB8::/32").unwrap();
        assert_eq!(addr.to_string(), "2001:db8::/32");
    }

    #[test]
    fn match_all_normalizes_to_any() {
        let addr = validate_address("0.0.0.0/0").unwrap();
        assert_eq!(addr.normalized(), AddressSpecifier::Any);

        let addr = validate_address("10.0.0.0/0").unwrap();
        assert_eq!(addr.normalized().to_string(), "10.0.0.0/0");
        assert_eq!(
            AddressSpecifier::External.normalized(),
            AddressSpecifier::External
        );
    }

    #[test]
    fn family_restriction() {
        validate_address_for("10.0.0.0/8", IpVersion::V4).unwrap();
        let err = validate_address_for("2001:db8::/32", IpVersion::V4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        validate_address_for("10.0.0.0/8", IpVersion::V6).unwrap_err();
    }

    #[test]
    fn ip_version_parse() {
        assert_eq!("ipv4".parse::<IpVersion>().unwrap(), IpVersion::V4);
        assert_eq!("IPv6".parse::<IpVersion>().unwrap(), IpVersion::V6);
        assert_eq!("any".parse::<IpVersion>().unwrap(), IpVersion::Any);
        "ipv5".parse::<IpVersion>().unwrap_err();
    }
}
