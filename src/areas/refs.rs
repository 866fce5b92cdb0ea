//! References (branches and HEAD)
//!
//! References are human-readable names pointing to commits:
//!
//! - `refs/heads/<branch>`: the branch's head commit hash, or an empty file
//!   while the branch has no commits yet
//! - `HEAD`: `ref: refs/heads/<branch>\n`, naming the checked-out branch
//!
//! Every update is written straight to disk; there is no ref transaction log.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing the symbolic HEAD reference
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Name of the HEAD reference file
pub const HEAD_REF_NAME: &str = "HEAD";

/// Reference manager rooted at the repository directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.babygit`)
    path: Box<Path>,
}

impl Refs {
    /// Read the branch HEAD points at
    ///
    /// # Returns
    ///
    /// `None` when HEAD is missing or does not hold a `ref: refs/heads/...` line
    pub fn read_head(&self) -> anyhow::Result<Option<BranchName>> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let symref = regex::Regex::new(SYMREF_REGEX)?;
        match symref.captures(content.trim()) {
            Some(captures) => Ok(Some(BranchName::try_parse(captures[1].to_string())?)),
            None => {
                log::warn!("HEAD does not name a branch: {:?}", content.trim());
                Ok(None)
            }
        }
    }

    /// Point HEAD at a branch
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        log::debug!("HEAD -> refs/heads/{}", branch_name);
        self.update_ref_file(
            &self.head_path(),
            &format!("ref: refs/heads/{}\n", branch_name),
        )
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// Read the head commit recorded for a branch
    ///
    /// # Returns
    ///
    /// `None` for a branch without commits; `BranchNotFound` if no ref file exists
    pub fn read_ref(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.branch_path(branch_name);
        if !ref_path.is_file() {
            return Err(RepositoryError::BranchNotFound(branch_name.to_string()).into());
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {:?}", ref_path))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string()).with_context(
                || format!("corrupt ref file at {:?}", ref_path),
            )?))
        }
    }

    /// Record a branch's head (an empty file when it has none yet)
    pub fn update_ref(
        &self,
        branch_name: &BranchName,
        oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        log::debug!(
            "refs/heads/{} -> {}",
            branch_name,
            oid.map(ObjectId::as_ref).unwrap_or("(unborn)")
        );
        self.update_ref_file(
            &self.branch_path(branch_name),
            oid.map(ObjectId::as_ref).unwrap_or(""),
        )
    }

    /// All branch names under `refs/heads`, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        if !heads_path.exists() {
            return Ok(Vec::new());
        }

        let mut names = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path.to_string_lossy().replace('\\', "/");
                BranchName::try_parse(name)
                    .inspect_err(|e| log::warn!("skipping ref file {:?}: {e}", entry.path()))
                    .ok()
            })
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(path, raw_ref)
            .with_context(|| format!("failed to write ref file at {:?}", path))
    }

    pub fn branch_path(&self, branch_name: &BranchName) -> PathBuf {
        self.heads_path().join(branch_name.as_ref())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }
}
