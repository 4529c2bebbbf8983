//! Rule priority.

use std::fmt;

use routerrules_core::{PRIORITY_MAX, PRIORITY_MIN, PRIORITY_UNSET};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ordering key of a rule within a router's rule set.
///
/// Always within `[-1, 3000]`; `-1` means "unset, append after the last
/// rule".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Priority(i32);

impl Priority {
    /// The "unset/append" priority.
    pub const UNSET: Priority = Priority(PRIORITY_UNSET);
    pub const MIN: Priority = Priority(PRIORITY_MIN);
    pub const MAX: Priority = Priority(PRIORITY_MAX);

    /// Create a priority, failing with `OutOfRange` outside `[-1, 3000]`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(PRIORITY_MIN) || value > i64::from(PRIORITY_MAX) {
            return Err(ValidationError::OutOfRange {
                value,
                min: PRIORITY_MIN,
                max: PRIORITY_MAX,
            });
        }
        Ok(Self(value as i32))
    }

    #[inline]
    pub fn get(&self) -> i32 {
        self.0
    }

    #[inline]
    pub fn is_unset(&self) -> bool {
        self.0 == PRIORITY_UNSET
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i64> for Priority {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Priority {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Priority> for i32 {
    fn from(value: Priority) -> Self {
        value.0
    }
}

/// Parse an optional priority field.
///
/// Absent or blank input defaults to [`Priority::UNSET`].
pub fn validate_priority(raw: Option<&str>) -> Result<Priority, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Priority::UNSET);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid(format!("priority must be a whole number, got {raw:?}")))?;
    Priority::new(value)
}
