use crate::areas::repository::Repository;
use crate::artifacts::branch::branch::BranchId;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Fork a new branch at the current branch's head
    ///
    /// The ref file is written immediately; a new branch forked from an unborn
    /// branch is itself unborn.
    pub fn create_branch(&mut self, name: &str) -> anyhow::Result<BranchId> {
        let branch_name = BranchName::try_parse(name.to_string())?;

        if self.branches().find(branch_name.as_ref()).is_some() {
            return Err(RepositoryError::BranchAlreadyExists(branch_name.to_string()).into());
        }

        let forked_from = self.current_branch_id();
        let head = forked_from.and_then(|id| self.branch(id).head().cloned());

        self.refs().update_ref(&branch_name, head.as_ref())?;
        let id = self.register_branch(branch_name, head, forked_from)?;

        writeln!(self.writer(), "Created branch {}", self.branch(id).name())?;

        Ok(id)
    }

    /// Print every branch, marking the current one
    pub fn list_branches(&self) -> anyhow::Result<()> {
        let current = self.current_branch_id();
        let mut writer = self.writer();

        for (id, branch) in self.branches().iter() {
            let marker = if Some(id) == current { "*" } else { " " };
            writeln!(writer, "{} {}", marker, branch.name())?;
        }

        Ok(())
    }
}
