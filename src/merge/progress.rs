//! Observation hooks invoked by the merge engine.
//!
//! [`MergeObserver`] receives callbacks as groups and fragments are copied.
//! Every method has a no-op default, so implementors override only what they
//! need. [`LogObserver`] emits structured `tracing` events and
//! [`ConsoleProgress`] renders the classic single-line progress display.

use std::{io::Write, path::Path};

use super::{BufferTier, MergeError};
use crate::{
    discovery::Group,
    fragment::{Fragment, FragmentKind},
};

/// Byte progress of the fragment currently being copied.
#[derive(Clone, Copy, Debug)]
pub struct FragmentProgress<'a> {
    /// Fragment being copied.
    pub fragment: &'a Fragment,
    /// Bytes copied so far.
    pub copied: u64,
    /// Size of the fragment in bytes.
    pub total: u64,
}

impl FragmentProgress<'_> {
    /// Completion percentage in `0.0..=100.0`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "percentages only need display precision"
    )]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.copied as f64 / self.total as f64) * 100.0
    }
}

/// Callbacks invoked while a merge run progresses.
pub trait MergeObserver {
    /// The shared copy buffer was sized.
    fn buffer_selected(&mut self, _tier: BufferTier) {}

    /// A group is about to be written to `output`.
    fn group_started(&mut self, _group: &Group, _output: &Path) {}

    /// A chunk of a fragment was appended.
    fn fragment_progress(&mut self, _progress: &FragmentProgress<'_>) {}

    /// A fragment was copied completely.
    fn fragment_finished(&mut self, _fragment: &Fragment) {}

    /// A group's output is in place.
    fn group_finished(&mut self, _group: &Group, _output: &Path) {}

    /// A group could not be merged.
    fn group_failed(&mut self, _group: &Group, _error: &MergeError) {}
}

/// Observer that ignores every callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl MergeObserver for NoopObserver {}

/// Observer emitting structured `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl MergeObserver for LogObserver {
    fn buffer_selected(&mut self, tier: BufferTier) {
        tracing::info!(bytes = tier.bytes(), "using {tier}");
    }

    fn group_started(&mut self, group: &Group, output: &Path) {
        tracing::info!(
            package = group.identifier(),
            pieces = group.piece_count(),
            output = %output.display(),
            "beginning merge"
        );
    }

    fn fragment_finished(&mut self, fragment: &Fragment) {
        tracing::debug!(
            ordinal = %fragment.ordinal(),
            path = %fragment.path().display(),
            "fragment merged"
        );
    }

    fn group_finished(&mut self, group: &Group, output: &Path) {
        tracing::info!(package = group.identifier(), output = %output.display(), "merge complete");
    }

    fn group_failed(&mut self, group: &Group, error: &MergeError) {
        tracing::error!(package = group.identifier(), error = %error, "merge failed");
    }
}

/// Observer printing carriage-return progress lines to a writer.
///
/// Write failures are ignored; progress output never aborts a merge.
#[derive(Debug)]
pub struct ConsoleProgress<W> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    /// Render progress to `out`.
    pub fn new(out: W) -> Self { Self { out } }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> MergeObserver for ConsoleProgress<W> {
    fn buffer_selected(&mut self, tier: BufferTier) {
        let _ = writeln!(self.out, "[Performance info] Using {tier}");
    }

    fn group_started(&mut self, group: &Group, output: &Path) {
        let pieces = group.piece_count();
        let noun = if pieces == 1 { "piece" } else { "pieces" };
        let _ = writeln!(
            self.out,
            "[work] beginning to merge {pieces} {noun} for package {}...",
            group.identifier()
        );
        if group.output_name_override().is_some() {
            let name = output.file_name().unwrap_or(output.as_os_str());
            let _ = writeln!(
                self.out,
                "[info] using custom output name from _sc file: {}",
                name.to_string_lossy()
            );
        }
    }

    fn fragment_progress(&mut self, progress: &FragmentProgress<'_>) {
        let fragment = progress.fragment;
        let label = match fragment.kind() {
            FragmentKind::Root => "root file".to_owned(),
            FragmentKind::Numbered => format!("part {}", fragment.ordinal()),
            FragmentKind::Terminal => "_sc part (final)".to_owned(),
        };
        let _ = write!(
            self.out,
            "\r\t[work] merged {}/{} bytes ({:.0}%) for {label}...",
            progress.copied,
            progress.total,
            progress.percent()
        );
        let _ = self.out.flush();
    }

    fn fragment_finished(&mut self, _fragment: &Fragment) {
        let _ = writeln!(self.out, "done");
    }

    fn group_failed(&mut self, group: &Group, error: &MergeError) {
        let _ = writeln!(
            self.out,
            "\n[error] failed to merge package {}: {error}",
            group.identifier()
        );
    }
}
