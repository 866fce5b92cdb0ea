//! Data structures and algorithms
//!
//! - `branch`: branch names and the branch arena
//! - `graph`: the lazily loaded commit graph and common-ancestor search
//! - `merge`: per-file three-way resolution, conflict markers, merge outcomes
//! - `objects`: object types (blob, tree, commit) and their ids

pub mod branch;
pub mod graph;
pub mod merge;
pub mod objects;
