//! Directory scan that turns a flat list of files into package groups.
//!
//! Discovery runs in three steps. Every entry is first classified by name
//! alone, so the single-mode terminal limit is enforced before any file is
//! opened. Root candidates are then resolved per identifier in ascending
//! ordinal order, which makes the outcome independent of directory iteration
//! order. Terminal fragments attach last, once every root and numbered
//! fragment is known.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use super::{DiscoveryError, Group, GroupingMode, SkipReason, SkipRecord};
use crate::{
    config::PackageFormat,
    fragment::{Fragment, HeaderCheck, NameError, ParsedName, check_header, parse_file_name},
};

/// Groups built from a source directory plus the files left out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Groups keyed by identifier.
    pub groups: BTreeMap<String, Group>,
    /// Files excluded from every group, in the order they were rejected.
    pub skipped: Vec<SkipRecord>,
}

impl Discovery {
    /// Whether no group was found.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
}

#[derive(Debug)]
struct TerminalFile {
    base: String,
    path: PathBuf,
}

#[derive(Debug, Default)]
struct Classified {
    candidates: BTreeMap<String, Vec<Fragment>>,
    terminals: Vec<TerminalFile>,
}

/// Discover groups in `source` using [`PackageFormat::DEFAULT`].
///
/// # Errors
///
/// See [`discover_with`].
pub fn discover(source: &Path, mode: GroupingMode) -> Result<Discovery, DiscoveryError> {
    discover_with(source, mode, &PackageFormat::DEFAULT)
}

/// Discover groups in `source` according to `mode` and `format`.
///
/// # Errors
///
/// Returns [`DiscoveryError`] when `source` is not a readable directory or
/// when [`GroupingMode::Single`] finds more than one terminal fragment. Files
/// that cannot be classified are reported in [`Discovery::skipped`] instead.
pub fn discover_with(
    source: &Path,
    mode: GroupingMode,
    format: &PackageFormat,
) -> Result<Discovery, DiscoveryError> {
    let entries = list_entries(source)?;
    let mut discovery = Discovery::default();
    let classified = classify(entries, format, &mut discovery.skipped);

    if mode == GroupingMode::Single && classified.terminals.len() > 1 {
        return Err(DiscoveryError::MultipleTerminals {
            files: classified.terminals.into_iter().map(|t| t.path).collect(),
        });
    }
    match classified.terminals.len() {
        0 => {}
        1 if mode == GroupingMode::Single => {
            info!("detected 1 file ending with '_sc'; it will be merged as the last part");
        }
        n => info!("detected {n} file(s) ending with '_sc'; processing multiple PKG groups"),
    }

    for (identifier, candidates) in classified.candidates {
        if let Some(group) = resolve_root(&identifier, candidates, format, &mut discovery.skipped)
        {
            discovery.groups.insert(identifier, group);
        }
    }

    attach_terminals(&mut discovery.groups, classified.terminals, mode);
    Ok(discovery)
}

fn list_entries(source: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !source.exists() {
        return Err(DiscoveryError::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(DiscoveryError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }
    let read_dir_error = |source_err| DiscoveryError::ReadDir {
        path: source.to_path_buf(),
        source: source_err,
    };
    let mut entries = fs::read_dir(source)
        .map_err(read_dir_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_error)?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

fn skip(skipped: &mut Vec<SkipRecord>, path: PathBuf, reason: SkipReason) {
    let name = display_name(&path);
    if reason.is_warning() {
        warn!("'{name}': {reason}. skipping...");
    } else {
        debug!("'{name}': {reason}. skipping...");
    }
    skipped.push(SkipRecord::new(path, reason));
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

fn classify(
    entries: Vec<PathBuf>,
    format: &PackageFormat,
    skipped: &mut Vec<SkipRecord>,
) -> Classified {
    let mut classified = Classified::default();
    for path in entries {
        if !path.is_file() {
            skip(skipped, path, SkipReason::NotAFile);
            continue;
        }
        if !format.is_package_file(&path) {
            skip(skipped, path, SkipReason::NotPackage);
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned)
        else {
            skip(skipped, path, SkipReason::InvalidName(NameError::NotUnicode));
            continue;
        };
        if format.is_previous_output(&file_name) {
            skip(skipped, path, SkipReason::PreviousOutput);
            continue;
        }

        match parse_file_name(&file_name, format) {
            Ok(ParsedName::Terminal { base }) => {
                classified.terminals.push(TerminalFile {
                    base: base.to_owned(),
                    path,
                });
            }
            Ok(ParsedName::Numbered {
                identifier,
                ordinal,
            }) => {
                classified
                    .candidates
                    .entry(identifier.to_owned())
                    .or_default()
                    .push(Fragment::new(ordinal, path));
            }
            Err(err) => skip(skipped, path, SkipReason::InvalidName(err)),
        }
    }
    classified
}

/// Pick the root of `identifier` and file the remaining candidates under it.
///
/// Candidates are tried in merge order; the first whose header matches
/// becomes the root. Candidates tried before it are skipped. Without a root
/// no group is created and every candidate is skipped.
fn resolve_root(
    identifier: &str,
    mut candidates: Vec<Fragment>,
    format: &PackageFormat,
    skipped: &mut Vec<SkipRecord>,
) -> Option<Group> {
    candidates.sort_by(Fragment::merge_order);
    let mut remaining = candidates.into_iter();

    let mut group = None;
    for candidate in remaining.by_ref() {
        let reason = match check_header(candidate.path(), format.magic) {
            Ok(HeaderCheck::Valid) => {
                info!("found root PKG file for {identifier}");
                group = Some(Group::with_root(
                    identifier,
                    Fragment::root(candidate.path()),
                ));
                break;
            }
            Ok(HeaderCheck::Mismatch { found }) => SkipReason::MagicMismatch { found },
            Ok(HeaderCheck::TooShort { len }) => SkipReason::HeaderTooShort { len },
            Err(err) => SkipReason::Unreadable {
                message: err.to_string(),
            },
        };
        skip(skipped, candidate.path().to_path_buf(), reason);
    }

    let Some(mut group) = group else {
        warn!("no root PKG file found for {identifier}; its pieces will not be merged");
        return None;
    };
    for piece in remaining {
        info!("found piece {} for PKG file {identifier}", piece.ordinal());
        group.push_numbered(piece);
    }
    Some(group)
}

fn attach_terminals(
    groups: &mut BTreeMap<String, Group>,
    terminals: Vec<TerminalFile>,
    mode: GroupingMode,
) {
    for TerminalFile { base, path } in terminals {
        let terminal = Fragment::terminal(path);
        let target = match mode {
            GroupingMode::Single => {
                if groups.len() > 1 {
                    warn!(
                        "single mode found {} packages; attaching '_sc' file to the first",
                        groups.len()
                    );
                }
                groups.values_mut().next()
            }
            GroupingMode::Multiple => groups.get_mut(&base),
        };
        info!("found _sc PKG file for {base} (will be merged as last part)");
        match target {
            Some(group) => group.attach_terminal(base, terminal),
            None => {
                groups.insert(base.clone(), Group::from_terminal(base, terminal));
            }
        }
    }
}
