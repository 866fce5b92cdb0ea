//! babygit: a minimal content-addressed version-control engine
//!
//! - `areas`: the persisted parts of a repository (objects, index, refs, working tree)
//! - `artifacts`: object types, branches, the commit graph and the merge engine
//! - `commands`: repository operations (init, add, commit, branch, checkout, merge, ...)
//! - `errors`: recoverable error kinds surfaced to callers

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
