use crate::common::command::{count_objects, repository_dir, run_babygit_command};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn hash_and_read_blob(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_babygit_command(dir.path(), &["init"]).assert().success();

    let files = write_generated_files(dir.path(), 1);
    let file = &files[0];
    let name = file
        .path
        .file_name()
        .ok_or("file without a name")?
        .to_string_lossy()
        .to_string();

    let output = run_babygit_command(dir.path(), &["hash-object", &name]).output()?;
    let dry_sha = String::from_utf8(output.stdout)?.trim().to_string();
    assert_eq!(count_objects(dir.path()), 0);

    run_babygit_command(dir.path(), &["hash-object", "-w", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains(dry_sha.clone()));
    assert_eq!(count_objects(dir.path()), 1);

    run_babygit_command(dir.path(), &["cat-file", "-p", &dry_sha])
        .assert()
        .success()
        .stdout(file.content.clone());

    Ok(())
}

#[rstest]
fn hash_of_known_content(repository_dir: TempDir) {
    run_babygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::write(repository_dir.path().join("hello.txt"), "hello\n").unwrap();

    run_babygit_command(repository_dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout("f572d396fae9206628714fb2ce00f72e94f2258f\n");
}
