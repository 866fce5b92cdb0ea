use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Switch to an existing branch and bring the working tree to its head
    ///
    /// The branch head is re-read from its ref file. Nothing changes when the
    /// branch is unknown or when the switch would clobber local edits.
    pub fn checkout(&mut self, name: &str) -> anyhow::Result<()> {
        let target_id = self
            .branches()
            .find(name)
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()))?;
        let target_name = self.branch(target_id).name().clone();

        let target_head = if self.refs().branch_exists(&target_name) {
            self.refs().read_ref(&target_name)?
        } else {
            self.branch(target_id).head().cloned()
        };

        let current_head = self
            .current_branch()
            .and_then(|branch| branch.head().cloned());
        let from = self.snapshot_of(current_head.as_ref())?;
        let to = self.snapshot_of(target_head.as_ref())?;

        let clobbered = self.local_changes(&from, &to)?;
        if !clobbered.is_empty() {
            return Err(RepositoryError::CheckoutConflict(clobbered).into());
        }

        self.sync_workspace(&from, &to)?;

        let already_current = self.current_branch_id() == Some(target_id);
        self.set_branch_head(target_id, target_head);
        self.set_current_branch(target_id);
        self.refs().set_head(&target_name)?;

        if already_current {
            writeln!(self.writer(), "Already on '{}'", target_name)?;
        } else {
            writeln!(self.writer(), "Switched to branch '{}'", target_name)?;
        }

        Ok(())
    }

    /// Tracked files whose working copy differs from `from` and that moving to
    /// `to` would overwrite or remove
    pub(crate) fn local_changes(&self, from: &Tree, to: &Tree) -> anyhow::Result<Vec<String>> {
        let names = from
            .entries()
            .keys()
            .chain(to.entries().keys())
            .collect::<BTreeSet<_>>();

        let mut clobbered = Vec::new();
        for name in names {
            let before = from.get(name);
            let after = to.get(name);
            if before == after || !self.workspace().exists(name) {
                continue;
            }

            let working = ObjectId::digest(&self.workspace().read_file(name)?);
            if Some(&working) != before && Some(&working) != after {
                clobbered.push(name.clone());
            }
        }

        Ok(clobbered)
    }

    /// Rewrite the working tree from one snapshot to another
    ///
    /// Files only in `from` are removed; files that are new or changed in `to`,
    /// or missing from disk, are written.
    pub(crate) fn sync_workspace(&self, from: &Tree, to: &Tree) -> anyhow::Result<()> {
        for name in from.entries().keys() {
            if to.get(name).is_none() {
                log::debug!("removing {name}");
                self.workspace().remove_file(name)?;
            }
        }

        for (name, oid) in to.entries() {
            if from.get(name) == Some(oid) && self.workspace().exists(name) {
                continue;
            }

            log::debug!("writing {name} at {}", oid.to_short_oid());
            let content = self.database().get(oid)?;
            self.workspace().write_file(name, &content)?;
        }

        Ok(())
    }
}
