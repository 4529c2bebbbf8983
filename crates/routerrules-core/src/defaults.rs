//! Default configuration values and rule field bounds.
//!
//! Centralized constants for use across all crates.

// ============================================================================
// Rule Field Bounds
// ============================================================================

/// Lowest accepted rule priority. `-1` means "unset, append".
pub const PRIORITY_MIN: i32 = -1;
/// Highest accepted rule priority.
pub const PRIORITY_MAX: i32 = 3000;
/// Priority used when the field is absent.
pub const PRIORITY_UNSET: i32 = -1;

/// Address keyword matching every address.
pub const KEYWORD_ANY: &str = "any";
/// Address keyword matching destinations outside the router's networks.
pub const KEYWORD_EXTERNAL: &str = "external";
/// CIDR literal rewritten to [`KEYWORD_ANY`] during normalization.
pub const MATCH_ALL_CIDR: &str = "0.0.0.0/0";
/// Separator between next-hop addresses in raw input.
pub const NEXTHOP_SEPARATOR: char = ',';

// ============================================================================
// Backend Defaults
// ============================================================================

/// Default backend kind.
pub const DEFAULT_BACKEND_KIND: &str = "memory";
/// Default wire codec for the HTTP backend.
pub const DEFAULT_BACKEND_CODEC: &str = "json";
/// Default HTTP backend request timeout in seconds.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Validator Defaults
// ============================================================================

/// Default accepted IP family ("any", "ipv4", "ipv6").
pub const DEFAULT_IP_VERSION: &str = "any";

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log format ("pretty", "compact", "json").
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
/// Default log output ("stderr", "stdout").
pub const DEFAULT_LOG_OUTPUT: &str = "stderr";
