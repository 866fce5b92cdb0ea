use crate::common::command::{init_repository_dir, run_babygit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("bad..name")]
#[case(".hidden")]
#[case("feature/")]
#[case("topic.lock")]
#[case("with space")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] branch_name: &str) {
    run_babygit_command(init_repository_dir.path(), &["branch", branch_name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}
