use crate::common::command::{
    babygit_merge, commit_all, get_commit_field, get_head_commit_sha, repository_dir,
    run_babygit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

/// Test merging with simple divergent branches
///
/// History:
///       A (base)
///      / \
///     B   C
///     |   |
///   master  feature
///
/// Expected: Merge commit combining B and C with A as common ancestor
#[rstest]
fn merge_simple_divergence(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_babygit_command(dir.path(), &["init"]).assert().success();

    // Commit A: f = 1, two side files
    write_file(FileSpec::new(dir.path().join("f.txt"), "1\n".to_string()));
    write_file(FileSpec::new(dir.path().join("left.txt"), "initial\n".to_string()));
    write_file(FileSpec::new(dir.path().join("right.txt"), "initial\n".to_string()));
    commit_all(dir.path(), "Commit A - base");

    run_babygit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // Commit B on master: modify left.txt
    write_file(FileSpec::new(
        dir.path().join("left.txt"),
        "initial\nmaster change\n".to_string(),
    ));
    commit_all(dir.path(), "Commit B - master changes");
    let master_head = get_head_commit_sha(dir.path())?;

    // Commit C on feature: modify right.txt and f
    run_babygit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("right.txt"),
        "initial\nfeature change\n".to_string(),
    ));
    write_file(FileSpec::new(dir.path().join("f.txt"), "2\n".to_string()));
    commit_all(dir.path(), "Commit C - feature changes");
    let feature_head = get_head_commit_sha(dir.path())?;

    run_babygit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    babygit_merge(dir.path(), "feature")
        .assert()
        .success()
        .stdout(predicate::str::contains("three-way"));

    assert_eq!(read_file(&dir.path().join("f.txt")), "2\n");
    assert_eq!(
        read_file(&dir.path().join("left.txt")),
        "initial\nmaster change\n"
    );
    assert_eq!(
        read_file(&dir.path().join("right.txt")),
        "initial\nfeature change\n"
    );

    let merge_head = get_head_commit_sha(dir.path())?;
    assert_eq!(get_commit_field(dir.path(), &merge_head, "parent")?, Some(master_head));
    assert_eq!(
        get_commit_field(dir.path(), &merge_head, "merge-parent")?,
        Some(feature_head)
    );
    assert_eq!(
        get_commit_field(dir.path(), &merge_head, "message")?,
        Some("Merge branch 'feature'".to_string())
    );

    Ok(())
}
