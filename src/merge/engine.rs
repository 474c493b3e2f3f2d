//! Streaming concatenation of grouped fragments into merged packages.
//!
//! A run first stats every fragment so empty or missing files are caught
//! before anything is written, then sizes one [`CopyBuffer`] from the
//! largest fragment and streams each group into a temporary sibling of its
//! output. The temporary is renamed into place only once complete, so a
//! failed run never leaves a truncated file under the final name.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    fs::{self, File},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use super::{CopyBuffer, FragmentProgress, LogObserver, MergeError, MergeObserver};
use crate::{
    config::{FailurePolicy, MergeOptions},
    discovery::Group,
    fragment::Fragment,
};

const PARTIAL_SUFFIX: &str = ".partial";

/// A group that could not be merged under [`FailurePolicy::SkipGroup`].
#[derive(Debug)]
pub struct GroupFailure {
    /// Identifier of the failed group.
    pub identifier: String,
    /// Cause of the failure.
    pub error: MergeError,
}

/// Outcome of a merge run.
#[derive(Debug, Default)]
pub struct MergeSummary {
    /// Merged files, in the order they were written.
    pub produced: Vec<PathBuf>,
    /// Groups skipped after a failure.
    pub failed: Vec<GroupFailure>,
}

#[derive(Debug)]
struct GroupPlan<'g> {
    group: &'g Group,
    fragments: Vec<(&'g Fragment, u64)>,
}

impl GroupPlan<'_> {
    fn largest(&self) -> u64 {
        self.fragments
            .iter()
            .map(|(_, size)| *size)
            .max()
            .unwrap_or(0)
    }
}

/// Streaming merge engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Create a merger using `options`.
    #[must_use]
    pub const fn new(options: MergeOptions) -> Self { Self { options } }

    /// Path of the merged file for `group` inside `destination`.
    #[must_use]
    pub fn output_path(&self, group: &Group, destination: &Path) -> PathBuf {
        destination.join(self.options.format.merged_file_name(group.output_stem()))
    }

    /// Merge every group into `destination`.
    ///
    /// Groups are written in iteration order. Within a group the output is
    /// the root, then numbered fragments by ascending ordinal, then the
    /// terminal fragment.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`] the first [`MergeError`] ends the run.
    /// Empty or unreadable fragments, and groups whose output name another
    /// group already claimed, are detected before any output is written. Under [`FailurePolicy::SkipGroup`] failures are collected in
    /// [`MergeSummary::failed`] and this method does not fail.
    pub fn merge_all<'g, O>(
        &self,
        groups: impl IntoIterator<Item = &'g Group>,
        destination: &Path,
        observer: &mut O,
    ) -> Result<MergeSummary, MergeError>
    where
        O: MergeObserver + ?Sized,
    {
        let mut summary = MergeSummary::default();
        let mut plans = Vec::new();
        let mut claimed: BTreeMap<PathBuf, String> = BTreeMap::new();
        for group in groups {
            let planned = plan_group(group).and_then(|plan| {
                match claimed.entry(self.output_path(group, destination)) {
                    Entry::Occupied(owner) => Err(MergeError::OutputCollision {
                        path: owner.key().clone(),
                        claimed_by: owner.get().clone(),
                    }),
                    Entry::Vacant(slot) => {
                        slot.insert(group.identifier().to_owned());
                        Ok(plan)
                    }
                }
            });
            match planned {
                Ok(plan) => plans.push(plan),
                Err(error) => self.record_failure(group, error, &mut summary, observer)?,
            }
        }

        let largest = plans.iter().map(GroupPlan::largest).max().unwrap_or(0);
        let mut buffer = CopyBuffer::for_largest(largest);
        observer.buffer_selected(buffer.tier());

        for plan in &plans {
            match self.merge_planned(plan, destination, &mut buffer, observer) {
                Ok(output) => summary.produced.push(output),
                Err(error) => self.record_failure(plan.group, error, &mut summary, observer)?,
            }
        }
        Ok(summary)
    }

    /// Merge a single group into `destination` using a caller-owned buffer.
    ///
    /// Concurrent callers must each supply their own buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeError`] if any fragment is empty or unreadable, or if
    /// the output cannot be written.
    pub fn merge_group<O>(
        &self,
        group: &Group,
        destination: &Path,
        buffer: &mut CopyBuffer,
        observer: &mut O,
    ) -> Result<PathBuf, MergeError>
    where
        O: MergeObserver + ?Sized,
    {
        let plan = plan_group(group)?;
        self.merge_planned(&plan, destination, buffer, observer)
    }

    fn record_failure<O>(
        &self,
        group: &Group,
        error: MergeError,
        summary: &mut MergeSummary,
        observer: &mut O,
    ) -> Result<(), MergeError>
    where
        O: MergeObserver + ?Sized,
    {
        observer.group_failed(group, &error);
        match self.options.failure_policy {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::SkipGroup => {
                summary.failed.push(GroupFailure {
                    identifier: group.identifier().to_owned(),
                    error,
                });
                Ok(())
            }
        }
    }

    fn merge_planned<O>(
        &self,
        plan: &GroupPlan<'_>,
        destination: &Path,
        buffer: &mut CopyBuffer,
        observer: &mut O,
    ) -> Result<PathBuf, MergeError>
    where
        O: MergeObserver + ?Sized,
    {
        let group = plan.group;
        let _span = tracing::info_span!("merge", package = group.identifier()).entered();
        let output = self.output_path(group, destination);
        let partial = partial_path(&output);
        observer.group_started(group, &output);

        let result = write_fragments(plan, &partial, buffer, observer)
            .and_then(|()| finalize(&partial, &output));
        if let Err(error) = result {
            match fs::remove_file(&partial) {
                Err(cleanup) if cleanup.kind() != io::ErrorKind::NotFound => {
                    tracing::warn!(
                        path = %partial.display(),
                        error = %cleanup,
                        "could not remove partial output"
                    );
                }
                _ => {}
            }
            return Err(error);
        }

        observer.group_finished(group, &output);
        Ok(output)
    }
}

/// Merge `groups` into `destination` with default options, logging progress.
///
/// # Errors
///
/// Returns the first [`MergeError`] encountered.
pub fn merge_all<'g>(
    groups: impl IntoIterator<Item = &'g Group>,
    destination: &Path,
) -> Result<Vec<PathBuf>, MergeError> {
    Merger::default()
        .merge_all(groups, destination, &mut LogObserver)
        .map(|summary| summary.produced)
}

fn plan_group(group: &Group) -> Result<GroupPlan<'_>, MergeError> {
    let fragments = group
        .fragments_in_merge_order()
        .into_iter()
        .map(|fragment| {
            let path = fragment.path();
            let size = fs::metadata(path)
                .map_err(|source| MergeError::Metadata {
                    path: path.to_path_buf(),
                    source,
                })?
                .len();
            if size == 0 {
                return Err(MergeError::EmptyFragment {
                    path: path.to_path_buf(),
                });
            }
            Ok((fragment, size))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GroupPlan { group, fragments })
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

fn write_fragments<O>(
    plan: &GroupPlan<'_>,
    partial: &Path,
    buffer: &mut CopyBuffer,
    observer: &mut O,
) -> Result<(), MergeError>
where
    O: MergeObserver + ?Sized,
{
    let mut out = File::create(partial).map_err(|source| MergeError::Open {
        path: partial.to_path_buf(),
        source,
    })?;

    for &(fragment, total) in &plan.fragments {
        let copied = copy_fragment(fragment, total, &mut out, partial, buffer, observer)?;
        if copied != total {
            return Err(MergeError::SizeChanged {
                path: fragment.path().to_path_buf(),
                expected: total,
                copied,
            });
        }
        observer.fragment_finished(fragment);
    }

    out.sync_all().map_err(|source| MergeError::Write {
        path: partial.to_path_buf(),
        source,
    })
}

fn copy_fragment<O>(
    fragment: &Fragment,
    total: u64,
    out: &mut File,
    out_path: &Path,
    buffer: &mut CopyBuffer,
    observer: &mut O,
) -> Result<u64, MergeError>
where
    O: MergeObserver + ?Sized,
{
    let mut input = File::open(fragment.path()).map_err(|source| MergeError::Open {
        path: fragment.path().to_path_buf(),
        source,
    })?;
    let chunk = buffer.as_mut_slice();
    let mut copied = 0_u64;
    loop {
        let read = match input.read(chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(MergeError::Read {
                    path: fragment.path().to_path_buf(),
                    source,
                });
            }
        };
        out.write_all(&chunk[..read])
            .map_err(|source| MergeError::Write {
                path: out_path.to_path_buf(),
                source,
            })?;
        copied += read as u64;
        observer.fragment_progress(&FragmentProgress {
            fragment,
            copied,
            total,
        });
    }
    Ok(copied)
}

fn finalize(partial: &Path, output: &Path) -> Result<(), MergeError> {
    let finalize_error = |source| MergeError::Finalize {
        path: output.to_path_buf(),
        source,
    };
    match fs::remove_file(output) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(finalize_error(err)),
    }
    fs::rename(partial, output).map_err(finalize_error)
}
