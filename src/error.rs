//! Canonical error and result types for the crate.
//!
//! [`Error`] joins the failures of both phases of a run: discovery, which
//! stops before any file is touched, and merging.

use thiserror::Error;

use crate::{discovery::DiscoveryError, merge::MergeError};

/// Top-level error type exposed by `pkg-merge`.
#[derive(Debug, Error)]
pub enum Error {
    /// The source directory could not be grouped.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// A merged file could not be written.
    #[error(transparent)]
    Merge(#[from] MergeError),
}

impl Error {
    /// Whether the failure happened before any output was written.
    #[must_use]
    pub fn is_validation(&self) -> bool { matches!(self, Self::Discovery(_)) }
}

/// Canonical result alias used by `pkg-merge` public APIs.
pub type Result<T> = std::result::Result<T, Error>;
