use crate::common::command::{
    bitlet_add, bitlet_checkout, bitlet_commit, bitlet_merge, commit_files, head_commit_id, init_repository_dir,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// History:
///   base (f = "base") <- master (f = "2")
///        ^
///        feature (f = "3", adds g, removes b)
#[rstest]
fn merge_with_conflict(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_files(dir, &[("f.txt", "base")], "Base");

    run_bitlet_command(dir, &["branch", "feature"]).assert().success();
    bitlet_checkout(dir, "feature").assert().success();
    write_file(FileSpec::new(dir.join("f.txt"), "3".to_string()));
    bitlet_add(dir, "f.txt").assert().success();
    write_file(FileSpec::new(dir.join("g.txt"), "g".to_string()));
    bitlet_add(dir, "g.txt").assert().success();
    run_bitlet_command(dir, &["rm", "b.txt"]).assert().success();
    bitlet_commit(dir, "Feature").assert().success();
    let feature_head = head_commit_id(dir);

    bitlet_checkout(dir, "master").assert().success();
    commit_files(dir, &[("f.txt", "2")], "Master");
    let master_head = head_commit_id(dir);

    bitlet_merge(dir, "feature")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("f.txt")).as_deref(),
        Some("<<<<<<< HEAD\n2\n=======\n3\n>>>>>>>")
    );
    assert_eq!(read_file(&dir.join("g.txt")).as_deref(), Some("g"));
    assert_eq!(read_file(&dir.join("b.txt")), None);
    assert_eq!(read_file(&dir.join("a.txt")).as_deref(), Some("a"));

    run_bitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Merge: {} {}\n",
            &master_head[..7],
            &feature_head[..7]
        )))
        .stdout(predicate::str::contains("\nMerged feature into master.\n"));

    run_bitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n=== Modifications Not Staged For Commit ===\n\n",
        ));

    Ok(())
}
