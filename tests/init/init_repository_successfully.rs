use crate::common::command::{repository_dir, run_babygit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    let git_dir = dir.path().canonicalize()?.join(".babygit");

    run_babygit_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty babygit repository in",
        ))
        .stdout(predicate::str::contains(git_dir.display().to_string()));

    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").join("heads").is_dir());
    assert_eq!(
        std::fs::read_to_string(git_dir.join("HEAD"))?,
        "ref: refs/heads/master\n"
    );
    assert_eq!(
        std::fs::read_to_string(git_dir.join("refs").join("heads").join("master"))?,
        ""
    );

    Ok(())
}

#[rstest]
fn init_repository_at_a_given_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_babygit_command(dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(dir.path().join("nested/project/.babygit/HEAD").is_file());

    Ok(())
}
