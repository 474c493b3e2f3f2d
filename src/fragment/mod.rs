//! Fragment primitives for split package images.
//!
//! This module collects the domain types describing individual fragment
//! files: their ordinal position, how their names are interpreted and how a
//! root candidate's header is verified. Grouping fragments into packages
//! lives in [`crate::discovery`].

pub mod error;
pub mod file;
pub mod header;
pub mod name;
pub mod ordinal;

pub use error::{HeaderCheck, NameError};
pub use file::{Fragment, FragmentKind};
pub use header::{check_header, classify_header};
pub use name::{ParsedName, parse_file_name};
pub use ordinal::Ordinal;
