//! Turns raw command line arguments into a validated merge request.
//!
//! Handles the shell quirks users hit in practice: stray quotes around
//! paths, and Windows shells merging both paths into one argument when a
//! quoted path ends with a backslash.

use std::{
    env,
    io,
    path::{Path, PathBuf},
};

use log::warn;
use pkg_merge::{FailurePolicy, GroupingMode, MergeOptions, ModeParseError};
use thiserror::Error;

use crate::cli::Cli;

/// Token selecting the current working directory as destination.
const CURRENT_DIR: &str = ".";

/// Problems with the supplied arguments. Nothing is touched on disk.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// Only one path was supplied and it could not be split in two.
    #[error("target folder argument is missing")]
    MissingDestination,
    /// The mode token was not recognised.
    #[error(transparent)]
    InvalidMode(#[from] ModeParseError),
    /// The current directory could not be determined.
    #[error("cannot resolve current directory: {0}")]
    CurrentDir(#[source] io::Error),
    /// A required directory does not exist.
    #[error("{role} directory '{}' does not exist", path.display())]
    Missing { role: &'static str, path: PathBuf },
    /// A required directory argument names something else.
    #[error("{role} argument '{}' is not a directory", path.display())]
    NotDirectory { role: &'static str, path: PathBuf },
}

/// A fully validated request.
#[derive(Debug)]
pub struct Invocation {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: GroupingMode,
    pub options: MergeOptions,
}

/// Validate `cli` into an [`Invocation`].
pub fn resolve(cli: Cli) -> Result<Invocation, ArgumentError> {
    let (source, destination) = match cli.destination {
        Some(destination) => (
            clean_path_argument(&cli.source).to_owned(),
            clean_path_argument(&destination).to_owned(),
        ),
        None => {
            let (source, destination) =
                split_merged_arguments(&cli.source).ok_or(ArgumentError::MissingDestination)?;
            warn!("detected merged arguments due to trailing backslash before quote");
            warn!("parsed as: source='{source}' target='{destination}'");
            (source, destination)
        }
    };

    let mode = match cli.mode.as_deref() {
        Some(token) => clean_path_argument(token).parse()?,
        None => GroupingMode::default(),
    };
    let failure_policy = if cli.keep_going {
        FailurePolicy::SkipGroup
    } else {
        FailurePolicy::Abort
    };

    let destination = if destination == CURRENT_DIR {
        env::current_dir().map_err(ArgumentError::CurrentDir)?
    } else {
        PathBuf::from(destination)
    };
    let source = PathBuf::from(source);
    require_directory("source", &source)?;
    require_directory("target", &destination)?;

    Ok(Invocation {
        source,
        destination,
        mode,
        options: MergeOptions::with_policy(failure_policy),
    })
}

fn require_directory(role: &'static str, path: &Path) -> Result<(), ArgumentError> {
    if !path.exists() {
        return Err(ArgumentError::Missing {
            role,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ArgumentError::NotDirectory {
            role,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Strip one leading and one trailing double quote.
pub fn clean_path_argument(raw: &str) -> &str {
    let trimmed = raw.strip_prefix('"').unwrap_or(raw);
    trimmed.strip_suffix('"').unwrap_or(trimmed)
}

/// Split `source" target` into its two paths.
///
/// A quoted path ending in a backslash escapes its closing quote, so the
/// shell passes both paths as one argument with a `"` followed by a space
/// where the first path ended.
pub fn split_merged_arguments(merged: &str) -> Option<(String, String)> {
    let quote = merged.find('"')?;
    let target = merged[quote + 1..].strip_prefix(' ')?;
    if target.is_empty() {
        return None;
    }
    Some((
        clean_path_argument(&merged[..quote]).to_owned(),
        clean_path_argument(target).to_owned(),
    ))
}
