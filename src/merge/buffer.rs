//! Copy buffer sized from the largest fragment of a run.
//!
//! One buffer is allocated per run and lent to every group merge, so
//! allocation cost is paid once and chunk size tracks the largest expected
//! read.

use std::fmt;

const KIB: usize = 1024;
const MIB: u64 = 1024 * 1024;

/// Size class selected from the largest fragment in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BufferTier {
    /// Largest fragment below 200 MiB: 512 KiB chunks.
    Small,
    /// Largest fragment below 1 GiB: 2 MiB chunks.
    Medium,
    /// Largest fragment below 4 GiB: 4 MiB chunks.
    Large,
    /// Anything bigger: 8 MiB chunks.
    Huge,
}

impl BufferTier {
    /// Select the tier for a run whose largest fragment is `largest` bytes.
    ///
    /// ```
    /// use pkg_merge::merge::BufferTier;
    /// assert_eq!(BufferTier::for_largest(0), BufferTier::Small);
    /// assert_eq!(BufferTier::for_largest(5 * 1024 * 1024 * 1024), BufferTier::Huge);
    /// ```
    #[must_use]
    pub const fn for_largest(largest: u64) -> Self {
        if largest < 200 * MIB {
            Self::Small
        } else if largest < 1024 * MIB {
            Self::Medium
        } else if largest < 4 * 1024 * MIB {
            Self::Large
        } else {
            Self::Huge
        }
    }

    /// Chunk size in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Small => 512 * KIB,
            Self::Medium => 2 * 1024 * KIB,
            Self::Large => 4 * 1024 * KIB,
            Self::Huge => 8 * 1024 * KIB,
        }
    }

    /// Human-readable label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        }
    }
}

impl fmt::Display for BufferTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.bytes();
        if bytes >= 1024 * KIB {
            write!(f, "{} MB buffer for {} files", bytes / (1024 * KIB), self.label())
        } else {
            write!(f, "{} KB buffer for {} files", bytes / KIB, self.label())
        }
    }
}

/// Reusable heap buffer for streaming copies.
#[derive(Debug)]
pub struct CopyBuffer {
    tier: BufferTier,
    bytes: Vec<u8>,
}

impl CopyBuffer {
    /// Allocate a buffer of the tier's size.
    #[must_use]
    pub fn new(tier: BufferTier) -> Self {
        Self {
            tier,
            bytes: vec![0; tier.bytes()],
        }
    }

    /// Allocate a buffer suited to a run whose largest fragment is `largest`.
    #[must_use]
    pub fn for_largest(largest: u64) -> Self { Self::new(BufferTier::for_largest(largest)) }

    /// Tier the buffer was sized from.
    #[must_use]
    pub const fn tier(&self) -> BufferTier { self.tier }

    /// Buffer length in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.bytes.len() }

    /// Whether the buffer has zero length. Never true for tiered buffers.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] { &mut self.bytes }
}
