//! File-name heuristics that map fragment names to packages.
//!
//! Split tools name fragments `<identifier>_<ordinal>.<ext>` and may add one
//! terminal fragment named `<base>_sc.<ext>`. [`parse_file_name`] is the only
//! place that interprets those names.

use super::{NameError, Ordinal};
use crate::config::PackageFormat;

/// Classification of a fragment file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedName<'a> {
    /// A terminal fragment and the base name preceding its marker.
    Terminal {
        /// Text before the terminal marker.
        base: &'a str,
    },
    /// A root or numbered fragment.
    Numbered {
        /// Text before the last `_`.
        identifier: &'a str,
        /// Integer between the last `_` and the first `.`.
        ordinal: Ordinal,
    },
}

/// Classify `file_name` according to `format`.
///
/// The caller is expected to have filtered on the package extension already;
/// this function only looks at the name's structure.
///
/// # Examples
///
/// ```
/// use pkg_merge::{
///     config::PackageFormat,
///     fragment::{Ordinal, ParsedName, parse_file_name},
/// };
/// let format = PackageFormat::DEFAULT;
/// assert_eq!(
///     parse_file_name("GAME_2.pkg", &format),
///     Ok(ParsedName::Numbered { identifier: "GAME", ordinal: Ordinal::new(2) }),
/// );
/// assert_eq!(
///     parse_file_name("GAME_sc.pkg", &format),
///     Ok(ParsedName::Terminal { base: "GAME" }),
/// );
/// ```
///
/// # Errors
///
/// Returns a [`NameError`] describing why the name cannot be interpreted.
pub fn parse_file_name<'a>(
    file_name: &'a str,
    format: &PackageFormat,
) -> Result<ParsedName<'a>, NameError> {
    if let Some(base) = file_name.strip_suffix(format.terminal_suffix().as_str()) {
        if base.is_empty() {
            return Err(NameError::EmptyIdentifier);
        }
        return Ok(ParsedName::Terminal { base });
    }

    let separator = file_name.rfind('_').ok_or(NameError::MissingSeparator)?;
    let dot = file_name.find('.').ok_or(NameError::MissingExtension)?;
    if dot < separator {
        return Err(NameError::MisplacedSeparator);
    }

    let identifier = &file_name[..separator];
    if identifier.is_empty() {
        return Err(NameError::EmptyIdentifier);
    }

    let ordinal = parse_ordinal(&file_name[separator + 1..dot])?;
    Ok(ParsedName::Numbered {
        identifier,
        ordinal,
    })
}

fn parse_ordinal(text: &str) -> Result<Ordinal, NameError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NameError::InvalidOrdinal(text.to_owned()));
    }
    let value: u32 = text
        .parse()
        .map_err(|_| NameError::InvalidOrdinal(text.to_owned()))?;
    let ordinal = Ordinal::new(value);
    if !ordinal.is_assignable() {
        return Err(NameError::ReservedOrdinal(value));
    }
    Ok(ordinal)
}
