use crate::areas::index::StagedChange;
use crate::areas::repository::Repository;
use crate::artifacts::graph::commit_graph::CommitNode;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use std::io::Write;
use std::rc::Rc;

impl Repository {
    pub fn commit(&mut self, message: &str, author: &str) -> anyhow::Result<Rc<CommitNode>> {
        self.commit_at(message, author, chrono::Utc::now().timestamp())
    }

    /// Snapshot the stage onto the current branch
    ///
    /// The new tree is the parent's file list with the staged entries applied:
    /// staged blobs replace or add files, staged removals drop them.
    /// Side effects happen in order (tree, commit, branch ref, stage clear) and
    /// are not atomic: a failure part way leaves unreferenced objects behind.
    pub fn commit_at(
        &mut self,
        message: &str,
        author: &str,
        timestamp: i64,
    ) -> anyhow::Result<Rc<CommitNode>> {
        if self.index().is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let branch_id = self
            .current_branch_id()
            .ok_or_else(|| anyhow::anyhow!("no branch is checked out"))?;
        let parent = self.branch(branch_id).head().cloned();

        let mut files = self.snapshot_of(parent.as_ref())?.into_entries();
        for (name, change) in self.index().entries() {
            match change {
                StagedChange::Update(oid) => {
                    files.insert(name.clone(), oid.clone());
                }
                StagedChange::Remove => {
                    files.remove(name);
                }
            }
        }
        let tree = Tree::new(files);
        let tree_oid = self.database().store(&tree)?;

        let is_root = parent.is_none();
        let commit = Commit::new(
            parent,
            tree_oid,
            tree,
            author.to_string(),
            timestamp,
            message.to_string(),
        );
        let commit_oid = self.database().store(&commit)?;
        let node = self.cache_commit(commit_oid.clone(), commit);

        self.advance_branch(branch_id, commit_oid.clone())?;

        self.index_mut().clear();
        self.index_mut().write_updates()?;

        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            self.branch(branch_id).name(),
            if is_root { "(root-commit) " } else { "" },
            commit_oid.to_short_oid(),
            node.short_message()
        )?;

        Ok(node)
    }
}
