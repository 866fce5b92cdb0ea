//! Plumbing commands
//!
//! - `hash-object`: compute a file's blob hash and optionally store it
//! - `cat-file`: print the raw content of a stored object

pub mod cat_file;
pub mod hash_object;
