use crate::common::command::{
    babygit_merge, commit_all, get_commit_field, get_head_commit_sha, repository_dir,
    run_babygit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

/// History:
///       A (f = 1)
///      / \
///     B   C
///  (f = 2) (f = 3)
///
/// Expected: conflict markers in f, a merge commit with both parents, non-zero exit
#[rstest]
fn merge_with_conflicts(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_babygit_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("f.txt"), "1\n".to_string()));
    commit_all(dir.path(), "A");

    run_babygit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("f.txt"), "2\n".to_string()));
    commit_all(dir.path(), "B");
    let master_head = get_head_commit_sha(dir.path())?;

    run_babygit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("f.txt"), "3\n".to_string()));
    commit_all(dir.path(), "C");
    let feature_head = get_head_commit_sha(dir.path())?;

    run_babygit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    babygit_merge(dir.path(), "feature")
        .assert()
        .failure()
        .stdout(predicate::str::contains("CONFLICT (content): Merge conflict in f.txt"))
        .stderr(predicate::str::contains("f.txt"));

    assert_eq!(
        read_file(&dir.path().join("f.txt")),
        "<<<<<<< ours\n2\n=======\n3\n>>>>>>> theirs\n"
    );

    let merge_head = get_head_commit_sha(dir.path())?;
    assert_ne!(merge_head, master_head);
    assert_eq!(get_commit_field(dir.path(), &merge_head, "parent")?, Some(master_head));
    assert_eq!(
        get_commit_field(dir.path(), &merge_head, "merge-parent")?,
        Some(feature_head)
    );

    Ok(())
}
