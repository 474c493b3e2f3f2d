//! Position of a fragment within its package.
//!
//! Provides [`Ordinal`], a type-safe wrapper around `u32` with reserved
//! values for the root and terminal fragments.

use derive_more::{Display, From};

/// Ordinal describing where a fragment lands in the merged output.
///
/// Root fragments always sit at [`Ordinal::ROOT`], terminal fragments at
/// [`Ordinal::TERMINAL`], and numbered fragments strictly between the two.
///
/// # Examples
///
/// ```
/// use pkg_merge::fragment::Ordinal;
/// let ordinal = Ordinal::new(3);
/// assert!(ordinal.is_numbered());
/// assert!(Ordinal::ROOT < ordinal && ordinal < Ordinal::TERMINAL);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("{_0}")]
pub struct Ordinal(u32);

impl Ordinal {
    /// Ordinal of the root fragment.
    pub const ROOT: Ordinal = Ordinal(0);

    /// Sentinel ordinal of the terminal fragment.
    pub const TERMINAL: Ordinal = Ordinal(9999);

    /// Construct an ordinal from a `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }

    /// Whether this ordinal lies strictly between root and terminal.
    #[must_use]
    pub const fn is_numbered(self) -> bool { self.0 > Self::ROOT.0 && self.0 < Self::TERMINAL.0 }

    /// Whether a parsed file-name ordinal is usable, i.e. below the sentinel.
    #[must_use]
    pub const fn is_assignable(self) -> bool { self.0 < Self::TERMINAL.0 }
}

impl From<Ordinal> for u32 {
    fn from(value: Ordinal) -> Self { value.0 }
}
