//! Package naming conventions and merge options.
//!
//! [`PackageFormat`] captures the file-name and header contract of split PKG
//! images. [`MergeOptions`] carries the runtime choices of a merge run. Both
//! are passed explicitly to the engines; nothing here is global state.

use std::path::Path;

/// Magic bytes found at offset 0 of every root PKG fragment.
pub const PKG_MAGIC: [u8; 4] = [0x7F, 0x43, 0x4E, 0x54];

/// File-name and header conventions of a split package set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackageFormat {
    /// Extension (without the dot) shared by every fragment and output.
    pub extension: &'static str,
    /// Marker placed before the extension on the terminal fragment.
    pub terminal_marker: &'static str,
    /// Marker inserted into merged output names.
    pub merged_marker: &'static str,
    /// Header expected at offset 0 of a root fragment.
    pub magic: [u8; 4],
}

impl PackageFormat {
    /// The PKG layout produced by common splitting tools.
    pub const DEFAULT: PackageFormat = PackageFormat {
        extension: "pkg",
        terminal_marker: "_sc",
        merged_marker: "-merged",
        magic: PKG_MAGIC,
    };

    /// Whether `path` carries the package extension.
    ///
    /// The comparison is case-sensitive.
    #[must_use]
    pub fn is_package_file(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_str() == Some(self.extension))
    }

    /// Whether `file_name` looks like the output of an earlier merge.
    #[must_use]
    pub fn is_previous_output(&self, file_name: &str) -> bool {
        file_name.contains(self.merged_marker)
    }

    /// Suffix identifying a terminal fragment, for example `_sc.pkg`.
    #[must_use]
    pub fn terminal_suffix(&self) -> String {
        format!("{}.{}", self.terminal_marker, self.extension)
    }

    /// Name of the merged file produced for `stem`.
    ///
    /// ```
    /// use pkg_merge::config::PackageFormat;
    /// assert_eq!(PackageFormat::DEFAULT.merged_file_name("GAME"), "GAME-merged.pkg");
    /// ```
    #[must_use]
    pub fn merged_file_name(&self, stem: &str) -> String {
        format!("{stem}{}.{}", self.merged_marker, self.extension)
    }
}

impl Default for PackageFormat {
    fn default() -> Self { PackageFormat::DEFAULT }
}

/// What the merge engine does when a single group cannot be written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failed group.
    #[default]
    Abort,
    /// Record the failure and continue with the remaining groups.
    SkipGroup,
}

/// Runtime options for a merge run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Naming and header conventions.
    pub format: PackageFormat,
    /// Behaviour on per-group failure.
    pub failure_policy: FailurePolicy,
}

impl MergeOptions {
    /// Options using [`PackageFormat::DEFAULT`] and the given policy.
    #[must_use]
    pub const fn with_policy(failure_policy: FailurePolicy) -> Self {
        Self {
            format: PackageFormat::DEFAULT,
            failure_policy,
        }
    }
}
