//! Core repository components
//!
//! - `database`: content-addressed object store for blobs, trees, and commits
//! - `index`: staged-file list for the next commit
//! - `refs`: branch ref files and HEAD
//! - `repository`: the repository handle tying the areas together
//! - `workspace`: working-tree file operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
