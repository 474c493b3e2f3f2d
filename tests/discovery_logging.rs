//! Log output produced while discovering packages.

mod common;

use common::{LoggerHandle, TestResult, Workspace, logger, workspace};
use log::Level;
use pkg_merge::{GroupingMode, discover};
use rstest::rstest;

#[rstest]
fn invalid_piece_is_reported_as_warning(
    workspace: Workspace,
    mut logger: LoggerHandle,
) -> TestResult {
    workspace.root("title_0.pkg", b"t0")?;
    workspace.fragment("title_x.pkg", b"tx")?;
    logger.drain();

    discover(workspace.source(), GroupingMode::Single)?;

    let records = logger.drain();
    assert!(records.iter().any(|(level, message)| {
        *level == Level::Warn
            && message
                == "'title_x.pkg': 'x' is not a valid piece (fails integer conversion). skipping..."
    }));
    Ok(())
}

#[rstest]
fn previous_output_is_only_a_debug_note(
    workspace: Workspace,
    mut logger: LoggerHandle,
) -> TestResult {
    workspace.root("GAME_0.pkg", b"g")?;
    workspace.fragment("GAME-merged.pkg", b"old")?;
    logger.drain();

    discover(workspace.source(), GroupingMode::Single)?;

    let records = logger.drain();
    let note = records
        .iter()
        .find(|(_, message)| message.starts_with("'GAME-merged.pkg'"))
        .ok_or("no record for previous output")?;
    assert_eq!(note.0, Level::Debug);
    Ok(())
}

#[rstest]
fn orphaned_pieces_warn_about_missing_root(
    workspace: Workspace,
    mut logger: LoggerHandle,
) -> TestResult {
    workspace.fragment("LOST_1.pkg", b"not a root")?;
    logger.drain();

    let discovery = discover(workspace.source(), GroupingMode::Multiple)?;

    assert!(discovery.is_empty());
    let records = logger.drain();
    assert!(records.iter().any(|(level, message)| {
        *level == Level::Warn && message.contains("no root PKG file found for LOST")
    }));
    Ok(())
}
