use crate::common::command::{commit_files, head_commit_id, init_repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn find_commits_by_message(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("c.txt", "c")], "Add c");
    let head = head_commit_id(dir);

    run_bitlet_command(dir, &["find", "Add c"])
        .assert()
        .success()
        .stdout(format!("{}\n", head));

    run_bitlet_command(dir, &["find", "Nothing like this"])
        .assert()
        .success()
        .stdout("Found no commit with that message.\n");

    Ok(())
}
