//! Error kind labels for metrics and logging.
//!
//! These constants provide consistent error classification across all crates.

/// Malformed CIDR, keyword, IP, action or priority text.
pub const ERROR_INVALID_FORMAT: &str = "invalid_format";
/// Priority outside the accepted range.
pub const ERROR_OUT_OF_RANGE: &str = "out_of_range";
/// Rule to delete does not exist.
pub const ERROR_NOT_FOUND: &str = "not_found";
/// Remote store unreachable or refused the operation.
pub const ERROR_BACKEND: &str = "backend";
