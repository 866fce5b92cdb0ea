use crate::common::command::{get_branch_commit_sha, init_repository_dir, run_babygit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    let branch_name = "feature-branch";

    // create the branch first time - should succeed
    run_babygit_command(repository_dir.path(), &["branch", branch_name])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created branch feature-branch"));

    let branch_ref_path = repository_dir
        .path()
        .join(".babygit")
        .join("refs")
        .join("heads")
        .join(branch_name);
    assert!(branch_ref_path.exists());
    let head = get_branch_commit_sha(repository_dir.path(), branch_name)?;
    assert_eq!(head, get_branch_commit_sha(repository_dir.path(), "master")?);

    // attempt to create the same branch again - should fail
    run_babygit_command(repository_dir.path(), &["branch", branch_name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(get_branch_commit_sha(repository_dir.path(), branch_name)?, head);

    Ok(())
}
