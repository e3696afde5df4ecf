use crate::common::command::{
    bitlet_add, bitlet_checkout, bitlet_merge, commit_files, head_commit_id, init_repository_dir,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn merge_with_staged_changes(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "feature"]).assert().success();
    write_file(FileSpec::new(dir.join("c.txt"), "c".to_string()));
    bitlet_add(dir, "c.txt").assert().success();

    bitlet_merge(dir, "feature")
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");

    Ok(())
}

#[rstest]
#[case::unknown("nope", "A branch with that name does not exist.\n")]
#[case::itself("master", "Cannot merge a branch with itself.\n")]
fn merge_branch_refusals(
    init_repository_dir: TempDir,
    #[case] branch: &str,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    bitlet_merge(init_repository_dir.path(), branch)
        .assert()
        .success()
        .stdout(message.to_string());

    Ok(())
}

#[rstest]
fn merge_blocked_by_untracked_file(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "feature"]).assert().success();
    bitlet_checkout(dir, "feature").assert().success();
    commit_files(dir, &[("new.txt", "theirs")], "Feature");
    bitlet_checkout(dir, "master").assert().success();
    commit_files(dir, &[("a.txt", "mine")], "Master");
    let head = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("new.txt"), "untracked".to_string()));

    bitlet_merge(dir, "feature")
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(head_commit_id(dir), head);
    assert_eq!(read_file(&dir.join("new.txt")).as_deref(), Some("untracked"));

    Ok(())
}
