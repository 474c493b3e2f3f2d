//! Two-phase run: discover every group, then merge them.

use std::path::Path;

use crate::{
    Result,
    config::MergeOptions,
    discovery::{GroupingMode, SkipRecord, discover_with},
    merge::{MergeObserver, MergeSummary, Merger},
};

/// Everything a run produced or left behind.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files excluded during discovery.
    pub skipped: Vec<SkipRecord>,
    /// Outcome of the merge phase.
    pub merge: MergeSummary,
}

/// Discover the packages in `source` and merge them into `destination`.
///
/// Discovery completes before the first byte is written, so validation
/// failures never leave partial output behind.
///
/// # Errors
///
/// Returns [`crate::Error::Discovery`] for structural problems in `source`
/// and [`crate::Error::Merge`] when writing fails under
/// [`FailurePolicy::Abort`](crate::config::FailurePolicy::Abort).
pub fn merge_directory<O>(
    source: &Path,
    destination: &Path,
    mode: GroupingMode,
    options: &MergeOptions,
    observer: &mut O,
) -> Result<RunSummary>
where
    O: MergeObserver + ?Sized,
{
    log::info!("merge mode: {mode}");
    let discovery = discover_with(source, mode, &options.format)?;
    if discovery.is_empty() {
        log::warn!("no PKG packages found in '{}'", source.display());
    }
    let merge = Merger::new(*options).merge_all(discovery.groups.values(), destination, observer)?;
    Ok(RunSummary {
        skipped: discovery.skipped,
        merge,
    })
}
