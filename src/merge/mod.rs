//! Streaming merge of discovered groups into single package files.
//!
//! The engine concatenates each [`Group`](crate::discovery::Group)'s
//! fragments in order, sharing one size-tiered [`CopyBuffer`] across the run
//! and reporting byte progress through a [`MergeObserver`].

pub mod buffer;
pub mod engine;
pub mod error;
pub mod progress;

pub use buffer::{BufferTier, CopyBuffer};
pub use engine::{GroupFailure, MergeSummary, Merger, merge_all};
pub use error::MergeError;
pub use progress::{ConsoleProgress, FragmentProgress, LogObserver, MergeObserver, NoopObserver};
