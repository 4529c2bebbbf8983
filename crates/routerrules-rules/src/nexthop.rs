//! Next-hop list parsing.

use std::net::IpAddr;

use routerrules_core::NEXTHOP_SEPARATOR;

use crate::address::IpVersion;
use crate::error::ValidationError;

/// Ordered next-hop addresses of a `permit` rule.
pub type NextHopList = Vec<IpAddr>;

/// Split a comma-separated next-hop field accepting either family.
///
/// An empty (or blank) field yields an empty list.
pub fn split_nexthops(raw: &str) -> Result<NextHopList, ValidationError> {
    split_nexthops_for(raw, IpVersion::Any)
}

/// Split a comma-separated next-hop field restricted to `version`.
///
/// Every element must be a plain IP address: no prefix length, no keyword.
pub fn split_nexthops_for(raw: &str, version: IpVersion) -> Result<NextHopList, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split(NEXTHOP_SEPARATOR)
        .map(|item| {
            let item = item.trim();
            let addr: IpAddr = item
                .parse()
                .map_err(|_| ValidationError::invalid(format!("invalid next hop address: {item:?}")))?;
            if !version.allows(&addr) {
                return Err(ValidationError::invalid(format!(
                    "next hop {item} is not an {} address",
                    version.as_str()
                )));
            }
            Ok(addr)
        })
        .collect()
}
