//! Errors raised while writing merged packages.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Failures of the streaming merge engine.
///
/// Every variant names the file involved so callers can report it or decide
/// to skip the affected group.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A fragment's size could not be determined.
    #[error("failed to stat fragment '{}': {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A fragment holds no bytes.
    #[error("fragment '{}' is empty", path.display())]
    EmptyFragment { path: PathBuf },
    /// Another group already claimed this output file.
    #[error("output '{}' is already produced by package {claimed_by}", path.display())]
    OutputCollision { path: PathBuf, claimed_by: String },
    /// A fragment changed size between planning and copying.
    #[error(
        "fragment '{}' changed size during merge: expected {expected} bytes, copied {copied}",
        path.display()
    )]
    SizeChanged {
        path: PathBuf,
        expected: u64,
        copied: u64,
    },
    /// A fragment or the output could not be opened.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading a fragment failed part way.
    #[error("failed to read fragment '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing the output failed.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The completed output could not be moved into place.
    #[error("failed to finalise '{}': {source}", path.display())]
    Finalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MergeError {
    /// Path of the file the failure concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Metadata { path, .. }
            | Self::EmptyFragment { path }
            | Self::OutputCollision { path, .. }
            | Self::SizeChanged { path, .. }
            | Self::Open { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Finalize { path, .. } => path,
        }
    }
}
