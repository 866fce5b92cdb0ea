use crate::common::command::{commit_all, get_head_commit_sha, init_repository_dir, run_babygit_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_branch_successfully(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let master_head = get_head_commit_sha(dir.path())?;

    run_babygit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_babygit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to branch 'feature'"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join(".babygit/HEAD"))?,
        "ref: refs/heads/feature\n"
    );

    write_file(FileSpec::new(dir.path().join("1.txt"), "uno\n".to_string()));
    write_file(FileSpec::new(dir.path().join("2.txt"), "dos\n".to_string()));
    commit_all(dir.path(), "feature work");
    let feature_head = get_head_commit_sha(dir.path())?;
    assert_ne!(feature_head, master_head);

    run_babygit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(get_head_commit_sha(dir.path())?, master_head);
    assert_eq!(read_file(&dir.path().join("1.txt")), "one\n");
    assert!(!dir.path().join("2.txt").exists());

    run_babygit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(get_head_commit_sha(dir.path())?, feature_head);
    assert_eq!(read_file(&dir.path().join("1.txt")), "uno\n");
    assert_eq!(read_file(&dir.path().join("2.txt")), "dos\n");

    Ok(())
}

#[rstest]
fn checkout_current_branch_is_a_no_op(init_repository_dir: TempDir) {
    run_babygit_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already on 'master'"));
}
