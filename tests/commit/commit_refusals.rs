use crate::common::command::{bitlet_add, bitlet_commit, head_commit_id, init_repository_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn commit_without_staged_changes(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    bitlet_commit(dir, "empty")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");

    assert_eq!(head_commit_id(dir), head);

    Ok(())
}

#[rstest]
fn commit_with_blank_message(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);
    write_file(FileSpec::new(dir.join("c.txt"), "c".to_string()));
    bitlet_add(dir, "c.txt").assert().success();

    bitlet_commit(dir, "")
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");

    assert_eq!(head_commit_id(dir), head);

    Ok(())
}
