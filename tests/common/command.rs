use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with `a.txt` ("a") and `b.txt` ("b") committed.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_bitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(repository_dir.path().join("a.txt"), "a".to_string()));
    write_file(FileSpec::new(repository_dir.path().join("b.txt"), "b".to_string()));

    bitlet_add(repository_dir.path(), "a.txt").assert().success();
    bitlet_add(repository_dir.path(), "b.txt").assert().success();
    bitlet_commit(repository_dir.path(), "Initial files")
        .assert()
        .success();

    repository_dir
}

pub fn run_bitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitlet").expect("Failed to find bitlet binary");
    cmd.env("BITLET_COMMIT_DATE", COMMIT_DATE);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn bitlet_add(dir: &Path, file: &str) -> Command {
    run_bitlet_command(dir, &["add", file])
}

pub fn bitlet_commit(dir: &Path, message: &str) -> Command {
    run_bitlet_command(dir, &["commit", message])
}

/// Write, stage and commit `files` in one go.
pub fn commit_files(dir: &Path, files: &[(&str, &str)], message: &str) {
    for (name, content) in files {
        write_file(FileSpec::new(dir.join(name), content.to_string()));
        bitlet_add(dir, name).assert().success();
    }

    bitlet_commit(dir, message).assert().success();
}

pub fn bitlet_checkout(dir: &Path, branch: &str) -> Command {
    run_bitlet_command(dir, &["checkout", branch])
}

pub fn bitlet_merge(dir: &Path, branch: &str) -> Command {
    run_bitlet_command(dir, &["merge", branch])
}

/// The commit ID HEAD points to, read straight from the metadata directory.
pub fn head_commit_id(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".bitlet").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Commit IDs printed by `log`, newest first.
pub fn log_commit_ids(dir: &Path) -> Vec<String> {
    let output = run_bitlet_command(dir, &["log"])
        .output()
        .expect("Failed to run log");

    String::from_utf8(output.stdout)
        .expect("log output is not UTF-8")
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect()
}
