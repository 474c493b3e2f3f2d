//! Grouping modes selecting how fragments map to packages.

use std::{fmt, str::FromStr};

use super::ModeParseError;

/// How fragments in a source directory are assigned to packages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupingMode {
    /// Every fragment belongs to one package; at most one terminal fragment.
    #[default]
    Single,
    /// Packages are distinguished by file-name prefix; one terminal each.
    Multiple,
}

impl GroupingMode {
    /// Command line token for this mode.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Single => "-single",
            Self::Multiple => "-multiple",
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.token()) }
}

impl FromStr for GroupingMode {
    type Err = ModeParseError;

    /// Parse `-single` or `-multiple`, case-insensitively. The leading
    /// hyphen is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        match token.strip_prefix('-').unwrap_or(&token) {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            _ => Err(ModeParseError {
                token: s.to_owned(),
            }),
        }
    }
}
