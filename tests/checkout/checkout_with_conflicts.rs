use crate::common::command::{commit_all, init_repository_dir, run_babygit_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_with_conflicts(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_babygit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("1.txt"), "master edit\n".to_string()));
    commit_all(dir.path(), "master edit");

    // uncommitted change to a file that differs between the branches
    write_file(FileSpec::new(dir.path().join("1.txt"), "scratch work\n".to_string()));

    run_babygit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would be overwritten by checkout"))
        .stderr(predicate::str::contains("1.txt"));

    assert_eq!(read_file(&dir.path().join("1.txt")), "scratch work\n");
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".babygit/HEAD"))?,
        "ref: refs/heads/master\n"
    );

    Ok(())
}
