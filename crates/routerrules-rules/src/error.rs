//! Error types for rule validation.

use std::fmt;

use routerrules_core::{ERROR_BACKEND, ERROR_INVALID_FORMAT, ERROR_NOT_FOUND, ERROR_OUT_OF_RANGE};
use thiserror::Error;

/// Machine-readable classification shared by every routerrules error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed CIDR, keyword, IP address, action or priority text.
    InvalidFormat,
    /// Priority outside `[-1, 3000]`.
    OutOfRange,
    /// The rule to delete does not exist.
    NotFound,
    /// The remote store was unreachable or rejected the operation.
    Backend,
}

impl ErrorKind {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidFormat => ERROR_INVALID_FORMAT,
            ErrorKind::OutOfRange => ERROR_OUT_OF_RANGE,
            ErrorKind::NotFound => ERROR_NOT_FOUND,
            ErrorKind::Backend => ERROR_BACKEND,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule input field an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Priority,
    Source,
    Destination,
    Action,
    Nexthops,
    RouterId,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Priority => "priority",
            Field::Source => "source",
            Field::Destination => "destination",
            Field::Action => "action",
            Field::Nexthops => "nexthops",
            Field::RouterId => "router_id",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while parsing and validating raw rule input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidFormat(String),

    #[error("value {value} is outside [{min}, {max}]")]
    OutOfRange { value: i64, min: i32, max: i32 },

    /// Wraps an error with the input field it was raised for.
    #[error("{field}: {source}")]
    Field {
        field: Field,
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Create an `InvalidFormat` error from any displayable message.
    #[inline]
    pub fn invalid<M: fmt::Display>(msg: M) -> Self {
        Self::InvalidFormat(msg.to_string())
    }

    /// Attach the input field this error was raised for.
    pub fn in_field(self, field: Field) -> Self {
        match self {
            already @ Self::Field { .. } => already,
            other => Self::Field {
                field,
                source: Box::new(other),
            },
        }
    }

    /// Classification of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::Field { source, .. } => source.kind(),
        }
    }

    /// Field the error was raised for, if known.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Field { field, .. } => Some(*field),
            _ => None,
        }
    }
}
