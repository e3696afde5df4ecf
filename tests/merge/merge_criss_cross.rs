use crate::common::command::{
    bitlet_checkout, bitlet_merge, commit_files, head_commit_id, init_repository_dir, run_bitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// Each branch merges the other's first commit, then `side` moves on:
///
/// ```text
///   base - m1 ------ mm (master)
///       \      \   /
///        \       X
///         \    /   \
///          s1 ----- sm - s2 (side)
/// ```
///
/// `m1` and `s1` are both best common ancestors of `mm` and `s2`; whichever is
/// picked, the merge is clean and brings in `n.txt`.
#[rstest]
fn merge_criss_cross(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "side"]).assert().success();

    commit_files(dir, &[("m.txt", "m1")], "m1");
    run_bitlet_command(dir, &["branch", "m1-tip"]).assert().success();

    bitlet_checkout(dir, "side").assert().success();
    commit_files(dir, &[("s.txt", "s1")], "s1");
    run_bitlet_command(dir, &["branch", "s1-tip"]).assert().success();
    bitlet_merge(dir, "m1-tip").assert().success().stdout("");

    bitlet_checkout(dir, "master").assert().success();
    bitlet_merge(dir, "s1-tip").assert().success().stdout("");
    let master_head = head_commit_id(dir);

    bitlet_checkout(dir, "side").assert().success();
    commit_files(dir, &[("n.txt", "n")], "s2");
    let side_head = head_commit_id(dir);
    bitlet_checkout(dir, "master").assert().success();

    bitlet_merge(dir, "side").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("n.txt")).as_deref(), Some("n"));
    assert_eq!(read_file(&dir.join("s.txt")).as_deref(), Some("s1"));
    assert_eq!(read_file(&dir.join("m.txt")).as_deref(), Some("m1"));
    run_bitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("===\ncommit "))
        .stdout(predicate::str::contains(format!(
            "Merge: {} {}\n",
            &master_head[..7],
            &side_head[..7]
        )));

    Ok(())
}
