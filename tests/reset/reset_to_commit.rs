use crate::common::command::{commit_files, head_commit_id, init_repository_dir, log_commit_ids, run_bitlet_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn reset_to_commit(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_commit_id(dir);
    commit_files(dir, &[("a.txt", "a2"), ("c.txt", "c")], "Second");

    run_bitlet_command(dir, &["reset", &first]).assert().success();

    assert_eq!(head_commit_id(dir), first);
    assert_eq!(log_commit_ids(dir)[0], first);
    assert_eq!(read_file(&dir.join("a.txt")).as_deref(), Some("a"));
    assert_eq!(read_file(&dir.join("c.txt")), None);

    Ok(())
}

#[rstest]
fn reset_to_unknown_commit(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_bitlet_command(init_repository_dir.path(), &["reset", "0123456789abcdef"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");

    Ok(())
}
