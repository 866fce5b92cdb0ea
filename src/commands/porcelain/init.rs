use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create a fresh repository in `path` with an unborn default branch checked out
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;

        let mut repository = Repository::new(path, writer)?;

        if repository.refs().head_path().exists() {
            return Err(RepositoryError::AlreadyInitialized(repository.git_path()).into());
        }

        fs::create_dir_all(repository.database().objects_path())
            .context("Failed to create .babygit/objects directory")?;

        fs::create_dir_all(repository.refs().heads_path())
            .context("Failed to create .babygit/refs/heads directory")?;

        fs::write(repository.index().path(), b"")
            .context("Failed to create .babygit/index file")?;

        let default_branch = BranchName::default_branch();
        repository.refs().update_ref(&default_branch, None)?;
        repository
            .refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD reference")?;

        let id = repository.register_branch(default_branch, None, None)?;
        repository.set_current_branch(id);

        writeln!(
            repository.writer(),
            "Initialized empty babygit repository in {}",
            repository.git_path().display()
        )?;

        Ok(repository)
    }
}
