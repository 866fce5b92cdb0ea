use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".babygit", ".", ".."];

/// The working tree: a flat directory of tracked files
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Regular files directly inside the working directory, in name order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| {
                format!("Unable to list working directory {}", self.path.display())
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if entry.file_type().is_file() && !IGNORED_PATHS.contains(&name.as_str()) {
                files.push(name);
            }
        }
        files.sort();

        Ok(files)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(name);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .with_context(|| format!("Unable to read file {}", file_path.display()))
    }

    /// Create or overwrite a file
    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.file_path(name);

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }

    /// Remove a file if it is present
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.file_path(name);
        if !file_path.exists() {
            return Ok(());
        }

        std::fs::remove_file(&file_path)
            .with_context(|| format!("Unable to remove file {}", file_path.display()))
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}
