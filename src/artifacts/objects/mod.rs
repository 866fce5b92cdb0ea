//! Stored object types
//!
//! Every piece of history is an immutable object identified by the SHA-1 digest
//! of its serialized form:
//!
//! - **Blob**: raw file content
//! - **Tree**: flat listing of `<hash> <filename>` records
//! - **Commit**: snapshot metadata with parent linkage and a tree reference
//!
//! Objects carry no type header on disk; the caller knows what it asked for.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
