use std::fmt::Display;

use thiserror::Error;

/// An enumeration of potential errors that appear during bencode encoding.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The value cannot be represented in a form the decoder would read back,
    /// e.g. an integer outside the signed 64-bit range or a structure nested
    /// deeper than the encoder allows.
    #[error("unsupported value: {reason}")]
    UnsupportedValue {
        /// Why the value cannot be encoded
        reason: String,
    },
}

impl Error {
    /// Raised when a value has no faithful bencode representation.
    /// The message should not be capitalized and should not end with a period.
    pub fn unsupported(reason: impl Display) -> Self {
        Error::UnsupportedValue {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn nesting_too_deep(max_depth: usize) -> Self {
        Self::unsupported(format!("nesting depth exceeds the limit of {}", max_depth))
    }
}

#[test]
fn encoding_errors_are_sync_send() {
    use crate::encoding::error::Error;
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}
    is_send::<Error>();
    is_sync::<Error>();
}
