use std::fmt::Display;

use thiserror::Error;

/// An enumeration of potential errors that appear during bencode decoding.
///
/// Every error carries the byte offset into the input at which the problem was
/// detected.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input does not follow the bencode grammar: an unknown tag byte, a
    /// malformed number, a non-string dictionary key or a nesting depth beyond
    /// the decoder's limit.
    #[error("malformed input at offset {offset}: {reason}")]
    MalformedInput {
        /// Where the offending byte or token starts
        offset: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A delimiter or a length-prefixed payload runs past the end of the input.
    #[error("truncated input at offset {offset}: {reason}")]
    TruncatedInput {
        /// Where the incomplete token starts
        offset: usize,
        /// What was still expected
        reason: String,
    },
}

impl Error {
    pub(crate) fn malformed(offset: usize, reason: impl Display) -> Self {
        Error::MalformedInput {
            offset,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn truncated(offset: usize, reason: impl Display) -> Self {
        Error::TruncatedInput {
            offset,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unexpected(expected: impl Display, got: u8, offset: usize) -> Self {
        Self::malformed(
            offset,
            format!("expected {}, got {:?}", expected, got as char),
        )
    }

    /// The offset into the input at which decoding failed.
    pub fn offset(&self) -> usize {
        match *self {
            Error::MalformedInput { offset, .. } | Error::TruncatedInput { offset, .. } => offset,
        }
    }

    /// Whether the input broke the grammar, as opposed to ending too early.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedInput { .. })
    }

    /// Whether the input ended before the value was complete.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::TruncatedInput { .. })
    }
}

#[test]
fn decoding_errors_are_sync_send() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}
    is_send::<Error>();
    is_sync::<Error>();
}
