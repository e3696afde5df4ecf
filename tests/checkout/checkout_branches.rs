use crate::common::command::{bitlet_checkout, commit_files, head_commit_id, init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, delete_file, read_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

/// Two commits on `feat`, then back to `master`: the working tree follows the branch
/// that is checked out, and `--` restores a file that was deleted on disk.
#[rstest]
fn checkout_branches_back_and_forth(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let master_head = head_commit_id(dir);

    run_bitlet_command(dir, &["branch", "feat"]).assert().success();
    bitlet_checkout(dir, "feat").assert().success();
    commit_files(dir, &[("f.txt", "f1")], "f1");
    commit_files(dir, &[("f.txt", "f2")], "f2");
    let feat_head = head_commit_id(dir);

    bitlet_checkout(dir, "master").assert().success();
    assert_eq!(head_commit_id(dir), master_head);
    assert_eq!(read_file(&dir.join("f.txt")), None);

    bitlet_checkout(dir, "feat").assert().success();
    assert_eq!(head_commit_id(dir), feat_head);
    assert_eq!(read_file(&dir.join("f.txt")).as_deref(), Some("f2"));

    delete_file(&dir.join("f.txt"));
    run_bitlet_command(dir, &["checkout", "--", "f.txt"]).assert().success();
    assert_eq!(read_file(&dir.join("f.txt")).as_deref(), Some("f2"));

    Ok(())
}

#[rstest]
fn checkout_current_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    bitlet_checkout(init_repository_dir.path(), "master")
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");

    Ok(())
}

#[rstest]
fn untracked_file_in_the_way(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "feat"]).assert().success();
    bitlet_checkout(dir, "feat").assert().success();
    commit_files(dir, &[("f.txt", "tracked on feat")], "f1");
    bitlet_checkout(dir, "master").assert().success();
    write_file(FileSpec::new(dir.join("f.txt"), "local".to_string()));

    bitlet_checkout(dir, "feat")
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.join("f.txt")).as_deref(), Some("local"));
    run_bitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::starts_with("=== Branches ===\nfeat\n*master\n"));

    Ok(())
}
