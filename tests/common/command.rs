use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR: &str = "fake_user <fake_email@email.com>";
pub const AUTHOR_DATE: &str = "1672574400";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit on master holding `1.txt` = `one`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_babygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one\n".to_string(),
    ));

    run_babygit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    babygit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_babygit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("babygit").expect("Failed to find babygit binary");
    cmd.env_remove("BABYGIT_AUTHOR");
    cmd.env_remove("BABYGIT_AUTHOR_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn babygit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_babygit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("BABYGIT_AUTHOR", AUTHOR),
        ("BABYGIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

pub fn babygit_merge(dir: &Path, branch: &str) -> Command {
    let mut cmd = run_babygit_command(dir, &["merge", branch]);
    cmd.envs(vec![
        ("BABYGIT_AUTHOR", AUTHOR),
        ("BABYGIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

/// Stage everything and commit it
pub fn commit_all(dir: &Path, message: &str) {
    run_babygit_command(dir, &["add", "."]).assert().success();
    babygit_commit(dir, message).assert().success();
}

/// Commit id the current branch points at, read through HEAD
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".babygit").join("HEAD"))?;
    let ref_path = head_content
        .trim()
        .strip_prefix("ref: ")
        .ok_or("HEAD is not a symbolic ref")?;

    let commit_sha = std::fs::read_to_string(dir.join(".babygit").join(ref_path))?;
    Ok(commit_sha.trim().to_string())
}

pub fn get_branch_commit_sha(dir: &Path, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
    let path = dir.join(".babygit").join("refs").join("heads").join(branch);
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Raw object content printed by `cat-file -p`
pub fn cat_object(dir: &Path, sha: &str) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_babygit_command(dir, &["cat-file", "-p", sha]).output()?;
    if !output.status.success() {
        return Err(format!("cat-file failed for {sha}").into());
    }

    Ok(String::from_utf8(output.stdout)?)
}

/// Value of a `<key> <value>` header line of a commit
pub fn get_commit_field(
    dir: &Path,
    sha: &str,
    key: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let content = cat_object(dir, sha)?;
    let prefix = format!("{key} ");

    Ok(content
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .map(|value| value.to_string()))
}

pub fn count_objects(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".babygit").join("objects"))
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}
