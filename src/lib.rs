#![doc(html_root_url = "https://docs.rs/pkg-merge/latest")]
//! Public API for the `pkg-merge` library.
//!
//! This crate reassembles PKG installer images that were split into numbered
//! fragments. [`discovery`] groups the files of a source directory into
//! packages and [`merge`] streams each package's fragments, in order, into a
//! single output file.

pub mod config;
pub mod discovery;
pub mod error;
pub mod fragment;
pub mod merge;
pub mod pipeline;

pub use config::{FailurePolicy, MergeOptions, PKG_MAGIC, PackageFormat};
pub use discovery::{
    Discovery,
    DiscoveryError,
    Group,
    GroupingMode,
    ModeParseError,
    SkipReason,
    SkipRecord,
    discover,
    discover_with,
};
pub use error::{Error, Result};
pub use fragment::{Fragment, FragmentKind, NameError, Ordinal, ParsedName, parse_file_name};
pub use merge::{
    BufferTier,
    ConsoleProgress,
    CopyBuffer,
    GroupFailure,
    LogObserver,
    MergeError,
    MergeObserver,
    MergeSummary,
    Merger,
    NoopObserver,
    merge_all,
};
pub use pipeline::{RunSummary, merge_directory};
