//! On-disk fragment handles.

use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use super::Ordinal;

/// Role a fragment plays in its package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// Carries the package header; always merged first.
    Root,
    /// Ordered body fragment.
    Numbered,
    /// Specially suffixed fragment merged last.
    Terminal,
}

/// A single file believed to belong to a package.
///
/// Fragments are immutable once discovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    ordinal: Ordinal,
    path: PathBuf,
}

impl Fragment {
    /// Create a fragment at `path` holding position `ordinal`.
    #[must_use]
    pub fn new(ordinal: Ordinal, path: impl Into<PathBuf>) -> Self {
        Self {
            ordinal,
            path: path.into(),
        }
    }

    /// Create the root fragment of a package.
    #[must_use]
    pub fn root(path: impl Into<PathBuf>) -> Self { Self::new(Ordinal::ROOT, path) }

    /// Create the terminal fragment of a package.
    #[must_use]
    pub fn terminal(path: impl Into<PathBuf>) -> Self { Self::new(Ordinal::TERMINAL, path) }

    /// Position of this fragment within its package.
    #[must_use]
    pub const fn ordinal(&self) -> Ordinal { self.ordinal }

    /// Location of the fragment on disk.
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    /// Role derived from the ordinal.
    #[must_use]
    pub fn kind(&self) -> FragmentKind {
        if self.ordinal == Ordinal::ROOT {
            FragmentKind::Root
        } else if self.ordinal == Ordinal::TERMINAL {
            FragmentKind::Terminal
        } else {
            FragmentKind::Numbered
        }
    }

    /// Merge ordering: ascending ordinal, ties broken by file name.
    #[must_use]
    pub fn merge_order(&self, other: &Self) -> Ordering {
        self.ordinal
            .cmp(&other.ordinal)
            .then_with(|| self.path.file_name().cmp(&other.path.file_name()))
    }
}
