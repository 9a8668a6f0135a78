//! Error types for textcore.

use std::fmt;

/// Result type alias for textcore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for buffer operations.
///
/// Only reads that cannot clamp to a nearby valid answer produce errors.
/// Line/column queries and cursor navigation clamp instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Offset outside the valid bounds of the document.
    OutOfRange { offset: usize, len: usize },
    /// Range that is reversed or extends past the end of the document.
    InvalidRange { start: usize, end: usize, len: usize },
    /// Operation not reachable through the pending-edit state machine.
    Unsupported(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { offset, len } => {
                write!(f, "offset {offset} out of range for length {len}")
            }
            Self::InvalidRange { start, end, len } => {
                write!(f, "invalid range {start}..{end} for length {len}")
            }
            Self::Unsupported(what) => write!(f, "unsupported: {what}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfRange { offset: 7, len: 3 };
        assert!(err.to_string().contains("offset 7"));

        let err = Error::InvalidRange {
            start: 5,
            end: 2,
            len: 10,
        };
        assert!(err.to_string().contains("5..2"));

        let err = Error::Unsupported("read inside deletion run");
        assert!(err.to_string().starts_with("unsupported"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&Error::Unsupported("x"));
    }
}
