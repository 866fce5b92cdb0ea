use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Recoverable failures of repository operations.
///
/// These travel inside `anyhow::Error`; callers that need to branch on the
/// kind use `err.downcast_ref::<RepositoryError>()`. Storage failures are
/// plain I/O errors with context and are not represented here.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("branch '{0}' already exists")]
    BranchAlreadyExists(String),

    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("cannot merge: {0}")]
    InvalidMergeState(String),

    #[error("no common ancestor between '{ours}' and '{theirs}'")]
    NoCommonAncestor { ours: String, theirs: String },

    #[error("automatic merge failed; fix conflicts in: {}", .0.join(", "))]
    MergeConflict(Vec<String>),

    #[error("not a babygit repository: {0}")]
    NotARepository(PathBuf),

    #[error("repository already initialized in {0}")]
    AlreadyInitialized(PathBuf),

    #[error(
        "your local changes to the following files would be overwritten by checkout: {}",
        .0.join(", ")
    )]
    CheckoutConflict(Vec<String>),
}

impl RepositoryError {
    /// Object and branch lookup misses
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepositoryError::ObjectNotFound(_) | RepositoryError::BranchNotFound(_)
        )
    }
}

/// Extract the repository error kind carried by an `anyhow::Error`, if any.
pub fn kind_of(error: &anyhow::Error) -> Option<&RepositoryError> {
    error.downcast_ref::<RepositoryError>()
}
