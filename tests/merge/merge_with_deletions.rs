use crate::common::command::{
    babygit_merge, cat_object, commit_all, get_head_commit_sha, repository_dir,
    run_babygit_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

/// Test merging a branch that deleted files
///
/// History:
///       A (base: f, gone, kept)
///      / \
///     B   C
///     |   |
///   master  feature
///
/// B modifies `kept`, C deletes `gone` and `kept`.
///
/// Expected: `gone` is removed, `kept` conflicts with a deleted theirs side
#[rstest]
fn merge_with_deletions(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_babygit_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("f.txt"), "1\n".to_string()));
    write_file(FileSpec::new(dir.path().join("gone.txt"), "gone\n".to_string()));
    write_file(FileSpec::new(dir.path().join("kept.txt"), "1\n".to_string()));
    commit_all(dir.path(), "Commit A - base");

    run_babygit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // Commit B on master: modify kept.txt
    write_file(FileSpec::new(dir.path().join("kept.txt"), "2\n".to_string()));
    commit_all(dir.path(), "Commit B - master changes");

    // Commit C on feature: delete gone.txt and kept.txt
    run_babygit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    std::fs::remove_file(dir.path().join("gone.txt"))?;
    std::fs::remove_file(dir.path().join("kept.txt"))?;
    commit_all(dir.path(), "Commit C - feature deletions");

    run_babygit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert!(dir.path().join("gone.txt").exists());

    babygit_merge(dir.path(), "feature")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "CONFLICT (delete/modify): Merge conflict in kept.txt",
        ));

    assert!(!dir.path().join("gone.txt").exists());
    assert_eq!(read_file(&dir.path().join("f.txt")), "1\n");
    assert_eq!(
        read_file(&dir.path().join("kept.txt")),
        "<<<<<<< ours\n2\n=======\n>>>>>>> theirs (deleted)\n"
    );

    let merge = cat_object(dir.path(), &get_head_commit_sha(dir.path())?)?;
    assert!(merge.lines().any(|line| line.ends_with(" kept.txt")));
    assert!(!merge.lines().any(|line| line.ends_with(" gone.txt")));

    Ok(())
}
