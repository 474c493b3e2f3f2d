//! Command line interface for the `pkg-merge` binary.
//!
//! Only the argument shape lives here so the build script can render the
//! manual page from it; interpretation happens in `invocation`.

use clap::Parser;

/// Command line arguments for the `pkg-merge` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pkg-merge",
    version,
    about = "Reassemble split PKG packages into single files",
    after_help = "Merge modes:\n  -single    all fragments form one package; at most one _sc file\n  \
                  -multiple  packages are grouped by file-name prefix; one _sc file per group\n\n\
                  Do not end quoted paths with a backslash: use \"C:\\PKGs\" rather than \"C:\\PKGs\\\"."
)]
pub struct Cli {
    /// Folder containing the PKG fragments to merge.
    pub source: String,

    /// Folder receiving the merged files. Use "." for the current directory.
    pub destination: Option<String>,

    /// Merge mode: "-single" (default) or "-multiple".
    #[arg(allow_hyphen_values = true)]
    pub mode: Option<String>,

    /// Carry on with the remaining packages when one of them fails to merge.
    #[arg(long)]
    pub keep_going: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::Cli;

    #[test]
    fn parses_source_and_destination() {
        let cli = Cli::parse_from(["pkg-merge", "in", "out"]);
        assert_eq!(cli.source, "in");
        assert_eq!(cli.destination.as_deref(), Some("out"));
        assert!(cli.mode.is_none());
        assert!(!cli.keep_going);
    }

    #[rstest]
    #[case("-single")]
    #[case("-MULTIPLE")]
    #[case("multiple")]
    fn accepts_hyphenated_mode_tokens(#[case] mode: &str) {
        let cli = Cli::parse_from(["pkg-merge", "in", "out", mode]);
        assert_eq!(cli.mode.as_deref(), Some(mode));
    }

    #[test]
    fn parses_keep_going_flag() {
        let cli = Cli::parse_from(["pkg-merge", "--keep-going", "in", "out", "-multiple"]);
        assert!(cli.keep_going);
        assert_eq!(cli.mode.as_deref(), Some("-multiple"));
    }

    #[test]
    fn rejects_missing_source() {
        assert!(Cli::try_parse_from(["pkg-merge"]).is_err());
    }

    #[test]
    fn rejects_surplus_arguments() {
        assert!(Cli::try_parse_from(["pkg-merge", "in", "out", "-single", "extra"]).is_err());
    }
}
