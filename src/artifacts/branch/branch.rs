//! Branches and the branch arena
//!
//! A branch is a mutable named pointer to a commit. Branches are kept in a flat
//! arena indexed by `BranchId`; the fork lineage (which branch a branch was
//! created from) is stored as index references into the same arena.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    name: BranchName,
    /// Tip commit; `None` while the branch is unborn
    head: Option<ObjectId>,
    /// Branch that was current when this one was created
    forked_from: Option<BranchId>,
}

impl Branch {
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    pub fn head(&self) -> Option<&ObjectId> {
        self.head.as_ref()
    }

    pub fn is_unborn(&self) -> bool {
        self.head.is_none()
    }

    pub fn forked_from(&self) -> Option<BranchId> {
        self.forked_from
    }
}

#[derive(Debug, Clone, Default)]
pub struct BranchArena {
    branches: Vec<Branch>,
    by_name: HashMap<BranchName, BranchId>,
}

impl BranchArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new branch
    ///
    /// Fails with `BranchAlreadyExists` (leaving the arena untouched) when the
    /// name is taken.
    pub fn insert(
        &mut self,
        name: BranchName,
        head: Option<ObjectId>,
        forked_from: Option<BranchId>,
    ) -> anyhow::Result<BranchId> {
        if self.by_name.contains_key(&name) {
            return Err(RepositoryError::BranchAlreadyExists(name.to_string()).into());
        }

        let id = BranchId(self.branches.len());
        self.branches.push(Branch {
            name: name.clone(),
            head,
            forked_from,
        });
        self.by_name.insert(name, id);

        Ok(id)
    }

    /// Exact, case-sensitive lookup
    pub fn find(&self, name: &str) -> Option<BranchId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: BranchId) -> &Branch {
        &self.branches[id.0]
    }

    pub fn set_head(&mut self, id: BranchId, head: Option<ObjectId>) {
        self.branches[id.0].head = head;
    }

    /// Branches in creation order
    pub fn iter(&self) -> impl Iterator<Item = (BranchId, &Branch)> {
        self.branches
            .iter()
            .enumerate()
            .map(|(index, branch)| (BranchId(index), branch))
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}
