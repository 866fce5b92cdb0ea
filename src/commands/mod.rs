//! Repository operations
//!
//! Commands are methods on [`Repository`](crate::areas::repository::Repository),
//! split the way git splits them:
//!
//! - `plumbing`: object-level commands (hash-object, cat-file)
//! - `porcelain`: version-control workflows (init, add, commit, branch, checkout, merge, status)

pub mod plumbing;
pub mod porcelain;
