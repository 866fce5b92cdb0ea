use crate::common::command::{init_repository_dir, run_babygit_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn list_branches(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    for name in ["feature", "bugfix", "topic/nested"] {
        run_babygit_command(dir.path(), &["branch", name])
            .assert()
            .success();
    }
    run_babygit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    let output = run_babygit_command(dir.path(), &["branch"]).output()?;
    assert!(output.status.success());

    // a fresh process discovers branches from the ref files in name order
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "  bugfix\n* feature\n  master\n  topic/nested\n"
    );

    Ok(())
}
