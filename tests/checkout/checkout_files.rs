use crate::common::command::{commit_files, init_repository_dir, log_commit_ids, run_bitlet_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn checkout_file_from_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "scribbles".to_string()));

    run_bitlet_command(dir, &["checkout", "--", "a.txt"]).assert().success();

    assert_eq!(read_file(&dir.join("a.txt")).as_deref(), Some("a"));

    Ok(())
}

#[rstest]
fn checkout_file_from_abbreviated_commit(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("a.txt", "a, second version")], "Second version");
    let first = log_commit_ids(dir)[1].clone();

    run_bitlet_command(dir, &["checkout", &first[..8], "--", "a.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("a.txt")).as_deref(), Some("a"));

    Ok(())
}

#[rstest]
#[case::unknown_commit(&["checkout", "0123456789abcdef", "--", "a.txt"], "No commit with that id exists.\n")]
#[case::untracked_file(&["checkout", "--", "zzz.txt"], "File does not exist in that commit.\n")]
fn checkout_file_refusals(
    init_repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitlet_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout(message.to_string());

    Ok(())
}
