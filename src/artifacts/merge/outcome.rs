use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

/// Result of merging another branch into the current one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The current branch was moved forward to the other branch's head
    FastForward { head: ObjectId },
    /// A merge commit was written; `conflicts` names files left with markers
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

impl MergeOutcome {
    /// Head of the current branch after the merge
    pub fn head(&self) -> &ObjectId {
        match self {
            MergeOutcome::FastForward { head } => head,
            MergeOutcome::Merged { commit, .. } => commit,
        }
    }

    pub fn conflicts(&self) -> &[String] {
        match self {
            MergeOutcome::FastForward { .. } => &[],
            MergeOutcome::Merged { conflicts, .. } => conflicts,
        }
    }

    pub fn is_conflicted(&self) -> bool {
        !self.conflicts().is_empty()
    }

    /// Turn a conflicted outcome into a `MergeConflict` error
    ///
    /// The merge commit already exists at this point; the error only reports it.
    pub fn ensure_clean(self) -> anyhow::Result<Self> {
        if self.is_conflicted() {
            Err(RepositoryError::MergeConflict(self.conflicts().to_vec()).into())
        } else {
            Ok(self)
        }
    }
}
