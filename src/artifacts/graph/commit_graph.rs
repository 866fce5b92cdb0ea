//! Commit graph
//!
//! Commits form a DAG through their parent hashes. The graph materializes
//! commits lazily from the object store and keeps every loaded commit in a
//! cache keyed by hash; the cache is the only owner of commit data, everything
//! else (branch heads, merge bookkeeping) refers to commits by `ObjectId` or
//! holds a shared read-only `Rc` handle.
//!
//! ## Common ancestor search
//!
//! `find_common_ancestor` only follows first-parent chains: the second parent
//! of a merge commit is never explored. For every commit on the first-parent
//! chain of `a` (starting at `a`), it checks whether that commit is on the
//! first-parent chain of `b`, and returns the first hit. This is *a* common
//! ancestor, not necessarily the lowest one, and histories joined only through
//! a merge commit's second parent look less related than they are.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::rc::Rc;

/// A commit together with the hash it was stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    oid: ObjectId,
    commit: Commit,
}

impl CommitNode {
    pub fn new(oid: ObjectId, commit: Commit) -> Self {
        CommitNode { oid, commit }
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn commit(&self) -> &Commit {
        &self.commit
    }
}

impl Deref for CommitNode {
    type Target = Commit;

    fn deref(&self) -> &Self::Target {
        &self.commit
    }
}

#[derive(Debug, Default)]
pub struct CommitGraph {
    commits: HashMap<ObjectId, Rc<CommitNode>>,
}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a commit, reading and parsing it from the store on first use
    pub fn load(&mut self, database: &Database, oid: &ObjectId) -> anyhow::Result<Rc<CommitNode>> {
        if let Some(node) = self.commits.get(oid) {
            return Ok(Rc::clone(node));
        }

        let commit = database.load_commit(oid)?;
        log::trace!("materialized commit {}", oid);

        Ok(self.insert(oid.clone(), commit))
    }

    /// Cache a commit that was just written
    pub fn insert(&mut self, oid: ObjectId, commit: Commit) -> Rc<CommitNode> {
        let node = Rc::new(CommitNode::new(oid.clone(), commit));
        self.commits.insert(oid, Rc::clone(&node));
        node
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.commits.contains_key(oid)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// `start` followed by its first parent, that commit's first parent, and so on
    pub fn first_parent_chain(
        &mut self,
        database: &Database,
        start: &ObjectId,
    ) -> anyhow::Result<Vec<Rc<CommitNode>>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(start.clone());

        while let Some(oid) = next {
            if !seen.insert(oid.clone()) {
                log::warn!("commit {} reached twice while walking history", oid);
                break;
            }

            let node = self.load(database, &oid)?;
            next = node.parent().cloned();
            chain.push(node);
        }

        Ok(chain)
    }

    /// Find a common ancestor of `a` and `b` along first-parent chains
    ///
    /// # Returns
    ///
    /// The first commit of `a`'s chain that also lies on `b`'s chain, or
    /// `None` when the two histories are disjoint
    pub fn find_common_ancestor(
        &mut self,
        database: &Database,
        a: &ObjectId,
        b: &ObjectId,
    ) -> anyhow::Result<Option<Rc<CommitNode>>> {
        let b_chain = self
            .first_parent_chain(database, b)?
            .into_iter()
            .map(|node| node.oid().clone())
            .collect::<HashSet<_>>();

        let ancestor = self
            .first_parent_chain(database, a)?
            .into_iter()
            .find(|node| b_chain.contains(node.oid()));

        match &ancestor {
            Some(node) => log::debug!("common ancestor of {} and {}: {}", a, b, node.oid()),
            None => log::debug!("{} and {} share no history", a, b),
        }

        Ok(ancestor)
    }
}
