//! Three-way merge
//!
//! - `resolution`: per-file classification of (base, ours, theirs)
//! - `conflict`: conflict-marker synthesis for files both sides changed
//! - `outcome`: what a merge did, and whether it left conflicts behind

pub mod conflict;
pub mod outcome;
pub mod resolution;
