//! Discovery and grouping of package fragments.
//!
//! Scans a flat source directory, classifies each file as a root, numbered
//! or terminal fragment, and assembles [`Group`]s keyed by identifier. The
//! result is complete before any merging starts.

pub mod error;
pub mod group;
pub mod mode;
pub mod scan;
pub mod skip;

pub use error::{DiscoveryError, ModeParseError};
pub use group::Group;
pub use mode::GroupingMode;
pub use scan::{Discovery, discover, discover_with};
pub use skip::{SkipReason, SkipRecord};
