use crate::common::command::{bitlet_add, init_repository_dir, run_bitlet_command};
use crate::common::file::{FileSpec, delete_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn status(dir: &std::path::Path) -> String {
    let output = run_bitlet_command(dir, &["status"])
        .output()
        .expect("Failed to run status");

    String::from_utf8(output.stdout).expect("status output is not UTF-8")
}

#[rstest]
fn clean_working_tree(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(
        status(init_repository_dir.path()),
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );

    Ok(())
}

#[rstest]
fn every_section_filled(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "other"]).assert().success();

    write_file(FileSpec::new(dir.join("staged.txt"), "s".to_string()));
    bitlet_add(dir, "staged.txt").assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "a, edited".to_string()));
    delete_file(&dir.join("b.txt"));
    write_file(FileSpec::new(dir.join("untracked.txt"), "u".to_string()));
    write_file(FileSpec::new(dir.join("nested").join("ignored.txt"), "i".to_string()));

    assert_eq!(
        status(dir),
        "=== Branches ===\n*master\nother\n\n\
         === Staged Files ===\nstaged.txt\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\na.txt (modified)\nb.txt (deleted)\n\n\
         === Untracked Files ===\nuntracked.txt\n\n"
    );

    Ok(())
}
