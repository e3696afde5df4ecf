use crate::common::command::{repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case::status(&["status"])]
#[case::log(&["log"])]
#[case::add(&["add", "a.txt"])]
#[case::commit(&["commit", "message"])]
fn commands_outside_a_repository_are_fatal(
    repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitlet_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("fatal: not a bitlet repository"));

    assert!(!repository_dir.path().join(".bitlet").exists());

    Ok(())
}

#[rstest]
fn missing_arguments_are_usage_errors(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_bitlet_command(repository_dir.path(), &["add"])
        .assert()
        .failure()
        .code(2);

    run_bitlet_command(repository_dir.path(), &["checkout"])
        .assert()
        .failure()
        .code(2);

    Ok(())
}
