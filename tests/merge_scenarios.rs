//! End-to-end runs of discovery followed by merging.
//!
//! Each test lays out a source directory of fragments and drives
//! [`merge_directory`] the way the binary does.

mod common;

use std::fs;

use common::{TestResult, Workspace, concat, workspace};
use pkg_merge::{
    DiscoveryError,
    Error,
    FailurePolicy,
    GroupingMode,
    MergeError,
    MergeOptions,
    NoopObserver,
    PKG_MAGIC,
    RunSummary,
    SkipReason,
    merge_directory,
};
use rstest::rstest;

fn run(workspace: &Workspace, mode: GroupingMode) -> pkg_merge::Result<RunSummary> {
    merge_directory(
        workspace.source(),
        workspace.destination(),
        mode,
        &MergeOptions::default(),
        &mut NoopObserver,
    )
}

#[rstest]
fn single_mode_merges_root_pieces_and_terminal(workspace: Workspace) -> TestResult {
    workspace.root("GAME_0.pkg", b"-root")?;
    workspace.fragment("GAME_1.pkg", b"-one")?;
    workspace.fragment("GAME_2.pkg", b"-two")?;
    workspace.fragment("GAME_sc.pkg", b"-final")?;

    let summary = run(&workspace, GroupingMode::Single)?;

    let output = workspace.destination().join("GAME-merged.pkg");
    assert_eq!(summary.merge.produced, vec![output.clone()]);
    assert_eq!(
        fs::read(&output)?,
        concat(&[&PKG_MAGIC[..], b"-root", b"-one", b"-two", b"-final"])
    );
    assert!(summary.skipped.is_empty());
    Ok(())
}

#[rstest]
fn pieces_merge_in_numeric_not_lexical_order(workspace: Workspace) -> TestResult {
    workspace.root("DEMO_0.pkg", b"")?;
    workspace.fragment("DEMO_10.pkg", b"[10]")?;
    workspace.fragment("DEMO_2.pkg", b"[2]")?;
    workspace.fragment("DEMO_1.pkg", b"[1]")?;

    run(&workspace, GroupingMode::Multiple)?;

    let merged = fs::read(workspace.destination().join("DEMO-merged.pkg"))?;
    assert_eq!(merged, concat(&[&PKG_MAGIC[..], b"[1]", b"[2]", b"[10]"]));
    Ok(())
}

#[rstest]
fn two_terminals_in_single_mode_write_nothing(workspace: Workspace) -> TestResult {
    workspace.root("A_0.pkg", b"a")?;
    workspace.fragment("A_sc.pkg", b"a-final")?;
    workspace.root("B_0.pkg", b"b")?;
    workspace.fragment("B_sc.pkg", b"b-final")?;

    let err = run(&workspace, GroupingMode::Single).expect_err("two terminals must fail");

    assert!(err.is_validation());
    match err {
        Error::Discovery(DiscoveryError::MultipleTerminals { files }) => assert_eq!(files.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
    assert!(workspace.outputs()?.is_empty());
    Ok(())
}

#[rstest]
fn multiple_mode_merges_disjoint_groups(workspace: Workspace) -> TestResult {
    workspace.root("A_0.pkg", b"a0")?;
    workspace.fragment("A_1.pkg", b"a1")?;
    workspace.fragment("A_sc.pkg", b"asc")?;
    workspace.root("B_0.pkg", b"b0")?;
    workspace.fragment("B_sc.pkg", b"bsc")?;

    let summary = run(&workspace, GroupingMode::Multiple)?;

    assert_eq!(summary.merge.produced.len(), 2);
    assert_eq!(workspace.outputs()?, ["A-merged.pkg", "B-merged.pkg"]);
    assert_eq!(
        fs::read(workspace.destination().join("A-merged.pkg"))?,
        concat(&[&PKG_MAGIC[..], b"a0", b"a1", b"asc"])
    );
    assert_eq!(
        fs::read(workspace.destination().join("B-merged.pkg"))?,
        concat(&[&PKG_MAGIC[..], b"b0", b"bsc"])
    );
    Ok(())
}

#[rstest]
fn unparsable_piece_is_skipped_and_siblings_merge(workspace: Workspace) -> TestResult {
    workspace.root("title_0.pkg", b"t0")?;
    workspace.fragment("title_1.pkg", b"t1")?;
    let bad = workspace.fragment("title_x.pkg", b"tx")?;

    let summary = run(&workspace, GroupingMode::Single)?;

    assert_eq!(
        fs::read(workspace.destination().join("title-merged.pkg"))?,
        concat(&[&PKG_MAGIC[..], b"t0", b"t1"])
    );
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].path, bad);
    assert!(matches!(summary.skipped[0].reason, SkipReason::InvalidName(_)));
    Ok(())
}

#[rstest]
fn rerun_replaces_output_and_ignores_it_as_input(workspace: Workspace) -> TestResult {
    // Merge into the source directory so the first output is seen on rerun.
    workspace.root("GAME_0.pkg", b"root")?;
    workspace.fragment("GAME_1.pkg", b"one")?;
    let merge = || {
        merge_directory(
            workspace.source(),
            workspace.source(),
            GroupingMode::Single,
            &MergeOptions::default(),
            &mut NoopObserver,
        )
    };

    merge()?;
    let output = workspace.source().join("GAME-merged.pkg");
    let first = fs::read(&output)?;
    let second_run = merge()?;

    assert_eq!(fs::read(&output)?, first);
    assert!(
        second_run
            .skipped
            .iter()
            .any(|record| record.path == output && record.reason == SkipReason::PreviousOutput)
    );
    assert!(!workspace.source().join("GAME-merged.pkg.partial").exists());
    Ok(())
}

#[rstest]
fn terminal_only_package_is_copied_once(workspace: Workspace) -> TestResult {
    workspace.fragment("LONE_sc.pkg", b"only")?;

    run(&workspace, GroupingMode::Single)?;

    assert_eq!(fs::read(workspace.destination().join("LONE-merged.pkg"))?, b"only");
    Ok(())
}

#[rstest]
fn single_mode_names_output_after_terminal(workspace: Workspace) -> TestResult {
    workspace.root("CUSA00001_0.pkg", b"r")?;
    workspace.fragment("My Game_sc.pkg", b"s")?;

    run(&workspace, GroupingMode::Single)?;

    assert_eq!(workspace.outputs()?, ["My Game-merged.pkg"]);
    Ok(())
}

#[rstest]
fn empty_fragment_aborts_before_writing(workspace: Workspace) -> TestResult {
    workspace.root("GAME_0.pkg", b"root")?;
    let empty = workspace.fragment("GAME_1.pkg", b"")?;

    let err = run(&workspace, GroupingMode::Single).expect_err("empty piece must fail");

    match err {
        Error::Merge(MergeError::EmptyFragment { path }) => assert_eq!(path, empty),
        other => panic!("unexpected error: {other}"),
    }
    assert!(workspace.outputs()?.is_empty());
    Ok(())
}

#[rstest]
fn keep_going_merges_healthy_groups(workspace: Workspace) -> TestResult {
    workspace.root("A_0.pkg", b"a")?;
    workspace.fragment("A_1.pkg", b"")?;
    workspace.root("B_0.pkg", b"b")?;

    let summary = merge_directory(
        workspace.source(),
        workspace.destination(),
        GroupingMode::Multiple,
        &MergeOptions::with_policy(FailurePolicy::SkipGroup),
        &mut NoopObserver,
    )?;

    assert_eq!(workspace.outputs()?, ["B-merged.pkg"]);
    assert_eq!(summary.merge.failed.len(), 1);
    assert_eq!(summary.merge.failed[0].identifier, "A");
    Ok(())
}

#[rstest]
fn directory_without_packages_produces_nothing(workspace: Workspace) -> TestResult {
    workspace.fragment("readme.txt", b"hello")?;

    let summary = run(&workspace, GroupingMode::Single)?;

    assert!(summary.merge.produced.is_empty());
    assert_eq!(summary.skipped.len(), 1);
    assert!(workspace.outputs()?.is_empty());
    Ok(())
}

#[rstest]
fn terminal_rename_onto_another_package_is_rejected(workspace: Workspace) -> TestResult {
    workspace.root("A_0.pkg", b"a0")?;
    workspace.fragment("A_1.pkg", b"a1")?;
    workspace.root("B_0.pkg", b"b0")?;
    workspace.fragment("B_sc.pkg", b"bsc")?;

    let err = run(&workspace, GroupingMode::Single).expect_err("shared output name must fail");

    match err {
        Error::Merge(MergeError::OutputCollision { path, claimed_by }) => {
            assert_eq!(path, workspace.destination().join("B-merged.pkg"));
            assert_eq!(claimed_by, "A");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(workspace.outputs()?.is_empty());
    Ok(())
}

#[rstest]
fn keep_going_keeps_first_claim_on_shared_output(workspace: Workspace) -> TestResult {
    workspace.root("A_0.pkg", b"a0")?;
    workspace.fragment("A_1.pkg", b"a1")?;
    workspace.root("B_0.pkg", b"b0")?;
    workspace.fragment("B_sc.pkg", b"bsc")?;

    let summary = merge_directory(
        workspace.source(),
        workspace.destination(),
        GroupingMode::Single,
        &MergeOptions::with_policy(FailurePolicy::SkipGroup),
        &mut NoopObserver,
    )?;

    let output = workspace.destination().join("B-merged.pkg");
    assert_eq!(summary.merge.produced, vec![output.clone()]);
    assert_eq!(
        fs::read(&output)?,
        concat(&[&PKG_MAGIC[..], b"a0", b"a1", b"bsc"])
    );
    assert_eq!(summary.merge.failed.len(), 1);
    assert_eq!(summary.merge.failed[0].identifier, "B");
    Ok(())
}
