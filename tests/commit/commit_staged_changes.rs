use crate::common::command::{
    bitlet_add, bitlet_commit, head_commit_id, init_repository_dir, log_commit_ids, run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_staged_changes(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let parent = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("a.txt"), "a, edited".to_string()));
    bitlet_add(dir, "a.txt").assert().success();
    run_bitlet_command(dir, &["rm", "b.txt"]).assert().success();

    bitlet_commit(dir, "Edit a, drop b")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let head = head_commit_id(dir);
    assert_ne!(head, parent);
    assert_eq!(log_commit_ids(dir)[..2], [head, parent]);

    run_bitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ));

    // the old version is still one checkout away
    let previous = &log_commit_ids(dir)[1];
    run_bitlet_command(dir, &["checkout", previous, "--", "b.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("b.txt")).as_deref(), Some("b"));

    Ok(())
}
