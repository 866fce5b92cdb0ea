use crate::areas::repository::Repository;
use crate::artifacts::merge::conflict::conflict_markers;
use crate::artifacts::merge::outcome::MergeOutcome;
use crate::artifacts::merge::resolution::{ConflictKind, FileResolution, MergePlan};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    pub fn merge(&mut self, name: &str, author: &str) -> anyhow::Result<MergeOutcome> {
        self.merge_at(name, author, chrono::Utc::now().timestamp())
    }

    /// Merge branch `name` into the current branch
    ///
    /// When the current head is the other head's parent the current branch
    /// simply moves forward. Otherwise each file is resolved against the common
    /// ancestor and a merge commit with both heads as parents is written, even
    /// when some files end up with conflict markers.
    pub fn merge_at(
        &mut self,
        name: &str,
        author: &str,
        timestamp: i64,
    ) -> anyhow::Result<MergeOutcome> {
        let theirs_id = self
            .branches()
            .find(name)
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()))?;
        let ours_id = self
            .current_branch_id()
            .ok_or_else(|| RepositoryError::InvalidMergeState("no branch is checked out".into()))?;

        if ours_id == theirs_id {
            return Err(RepositoryError::InvalidMergeState(format!(
                "cannot merge branch '{name}' into itself"
            ))
            .into());
        }

        let ours_name = self.branch(ours_id).name().to_string();
        let ours_oid = self.branch(ours_id).head().cloned().ok_or_else(|| {
            RepositoryError::InvalidMergeState(format!("branch '{ours_name}' has no commits"))
        })?;
        let theirs_oid = self.branch(theirs_id).head().cloned().ok_or_else(|| {
            RepositoryError::InvalidMergeState(format!("branch '{name}' has no commits"))
        })?;

        if ours_oid == theirs_oid {
            return Err(RepositoryError::InvalidMergeState(format!(
                "'{name}' and '{ours_name}' point at the same commit"
            ))
            .into());
        }

        let theirs = self.load_commit(&theirs_oid)?;
        if theirs.parent() == Some(&ours_oid) {
            let from = self.snapshot_of(Some(&ours_oid))?;
            let to = self.snapshot_of(Some(&theirs_oid))?;
            self.sync_workspace(&from, &to)?;
            self.advance_branch(ours_id, theirs_oid.clone())?;

            writeln!(
                self.writer(),
                "Updating {}..{}\nFast-forward",
                ours_oid.to_short_oid(),
                theirs_oid.to_short_oid()
            )?;

            return Ok(MergeOutcome::FastForward { head: theirs_oid });
        }

        let ancestor = self
            .find_common_ancestor(&ours_oid, &theirs_oid)?
            .ok_or_else(|| RepositoryError::NoCommonAncestor {
                ours: ours_name.clone(),
                theirs: name.to_string(),
            })?;
        log::debug!(
            "merging {} into {} from base {}",
            theirs_oid.to_short_oid(),
            ours_oid.to_short_oid(),
            ancestor.oid().to_short_oid()
        );

        let base = self.snapshot_of(Some(ancestor.oid()))?;
        let ours = self.snapshot_of(Some(&ours_oid))?;
        let theirs = self.snapshot_of(Some(&theirs_oid))?;
        let plan = MergePlan::build(&base, &ours, &theirs);

        let mut merged = BTreeMap::new();
        for (file, resolution) in plan.files() {
            match resolution {
                FileResolution::Take(oid) => {
                    let blob = self.database().load_blob(oid)?;
                    self.workspace().write_file(file, blob.content())?;
                    merged.insert(file.clone(), oid.clone());
                }
                FileResolution::Remove => {
                    self.workspace().remove_file(file)?;
                }
                FileResolution::Conflict(kind) => {
                    // markers are stored so the commit matches the working tree
                    let content = self.conflicted_content(kind)?;
                    let oid = self.database().put(&content)?;
                    self.workspace().write_file(file, &content)?;
                    merged.insert(file.clone(), oid);
                }
            }
        }

        let mut conflicts = Vec::new();
        for (file, kind) in plan.conflicts() {
            writeln!(
                self.writer(),
                "CONFLICT ({}): Merge conflict in {}",
                kind.describe(),
                file
            )?;
            conflicts.push(file.clone());
        }

        let tree = Tree::new(merged);
        let tree_oid = self.database().store(&tree)?;
        let commit = Commit::new(
            Some(ours_oid),
            tree_oid,
            tree,
            author.to_string(),
            timestamp,
            format!("Merge branch '{name}'"),
        )
        .with_second_parent(theirs_oid);
        let commit_oid = self.database().store(&commit)?;
        self.cache_commit(commit_oid.clone(), commit);
        self.advance_branch(ours_id, commit_oid.clone())?;

        if plan.is_clean() {
            writeln!(self.writer(), "Merge made by the 'three-way' strategy.")?;
        } else {
            writeln!(
                self.writer(),
                "Automatic merge failed; fix conflicts and then commit the result."
            )?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_oid,
            conflicts,
        })
    }

    fn conflicted_content(&self, kind: &ConflictKind) -> anyhow::Result<Bytes> {
        let load = |oid: &ObjectId| {
            self.database()
                .load_blob(oid)
                .map(|blob| blob.content().clone())
        };

        let (ours, theirs) = match kind {
            ConflictKind::BothModified { ours, theirs } => (Some(load(ours)?), Some(load(theirs)?)),
            ConflictKind::DeletedByUs { theirs } => (None, Some(load(theirs)?)),
            ConflictKind::DeletedByThem { ours } => (Some(load(ours)?), None),
        };

        Ok(conflict_markers(ours.as_deref(), theirs.as_deref()))
    }
}
