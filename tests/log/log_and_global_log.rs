use crate::common::command::{
    bitlet_checkout, commit_files, head_commit_id, init_repository_dir, log_commit_ids, run_bitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn log_prints_medium_blocks(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_bitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "===\ncommit {}\nDate: Sun Jan 1 12:00:00 2023 +0000\nInitial files\n\n===\ncommit ",
            head
        )));

    Ok(())
}

#[rstest]
fn log_follows_only_the_current_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "side"]).assert().success();
    bitlet_checkout(dir, "side").assert().success();
    commit_files(dir, &[("side.txt", "s")], "Side work");
    let side_head = head_commit_id(dir);
    bitlet_checkout(dir, "master").assert().success();

    assert!(!log_commit_ids(dir).contains(&side_head));

    run_bitlet_command(dir, &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}\n", side_head)))
        .stdout(predicate::str::contains("\nSide work\n"))
        .stdout(predicate::str::contains("\ninitial commit\n"));

    Ok(())
}
