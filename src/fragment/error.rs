//! Errors raised while interpreting fragment file names and headers.

use thiserror::Error;

/// Reasons a file name cannot be classified as a fragment.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// The name is not valid UTF-8.
    #[error("file name is not valid unicode")]
    NotUnicode,
    /// The name has no `_` separating identifier and ordinal.
    #[error("file name has no '_' before the ordinal")]
    MissingSeparator,
    /// The name has no `.` terminating the ordinal.
    #[error("file name has no extension")]
    MissingExtension,
    /// The first `.` precedes the last `_`, leaving no ordinal between them.
    #[error("file name has an extension before the ordinal separator")]
    MisplacedSeparator,
    /// Nothing precedes the separator or terminal marker.
    #[error("file name has an empty package identifier")]
    EmptyIdentifier,
    /// The ordinal text is not a decimal integer.
    #[error("'{0}' is not a valid piece (fails integer conversion)")]
    InvalidOrdinal(String),
    /// The ordinal collides with the reserved terminal sentinel.
    #[error("piece {0} is reserved for the terminal fragment")]
    ReservedOrdinal(u32),
}

/// Outcome of checking a root candidate's header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderCheck {
    /// The first four bytes match the package magic.
    Valid,
    /// The first four bytes differ from the package magic.
    Mismatch {
        /// Bytes actually found at offset 0.
        found: [u8; 4],
    },
    /// The file holds fewer than four bytes.
    TooShort {
        /// Length of the file in bytes.
        len: usize,
    },
}
