//! Structured records of files left out of every group.

use std::{fmt, path::PathBuf};

use crate::fragment::NameError;

/// Why a file was excluded from discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is a directory or other non-regular file.
    NotAFile,
    /// The extension does not match the package format.
    NotPackage,
    /// The name marks the output of an earlier merge.
    PreviousOutput,
    /// The file name could not be interpreted.
    InvalidName(NameError),
    /// An assumed root fragment carries the wrong header.
    MagicMismatch { found: [u8; 4] },
    /// An assumed root fragment is shorter than the header.
    HeaderTooShort { len: usize },
    /// An assumed root fragment could not be read.
    Unreadable { message: String },
}

impl SkipReason {
    /// Whether the skip deserves a warning rather than a debug note.
    #[must_use]
    pub fn is_warning(&self) -> bool { !matches!(self, Self::PreviousOutput | Self::NotAFile) }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAFile => f.write_str("not a regular file"),
            Self::NotPackage => f.write_str("not a PKG file"),
            Self::PreviousOutput => f.write_str("output of an earlier merge"),
            Self::InvalidName(err) => write!(f, "{err}"),
            Self::MagicMismatch { found } => write!(
                f,
                "assumed root PKG file doesn't match PKG magic (is {})",
                hex(found)
            ),
            Self::HeaderTooShort { len } => {
                write!(f, "assumed root PKG file holds only {len} bytes")
            }
            Self::Unreadable { message } => write!(f, "assumed root PKG file unreadable: {message}"),
        }
    }
}

fn hex(bytes: &[u8]) -> String { bytes.iter().map(|b| format!("{b:02x}")).collect() }

/// A file excluded from every group, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkipRecord {
    /// Path of the skipped file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl SkipRecord {
    /// Build a record for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}
