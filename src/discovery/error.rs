//! Errors produced while discovering fragment groups.
//!
//! Only structural problems are errors; per-file issues become
//! [`SkipRecord`](crate::discovery::SkipRecord)s instead.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal problems detected before any group is returned.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The source directory does not exist.
    #[error("source directory '{}' does not exist", path.display())]
    SourceMissing { path: PathBuf },
    /// The source path exists but is not a directory.
    #[error("source argument '{}' is not a directory", path.display())]
    SourceNotDirectory { path: PathBuf },
    /// The source directory could not be listed.
    #[error("failed to read source directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Single mode found more than one terminal fragment.
    #[error(
        "detected {} files ending with '_sc' in single mode; use '-multiple' to process \
         several package groups",
        files.len()
    )]
    MultipleTerminals { files: Vec<PathBuf> },
}

/// A grouping mode token was not recognised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid mode '{token}'; must be '-single' or '-multiple'")]
pub struct ModeParseError {
    /// The rejected token as supplied.
    pub token: String,
}
