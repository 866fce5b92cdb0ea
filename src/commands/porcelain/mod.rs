//! Porcelain commands
//!
//! - `init`: create a repository with an unborn default branch
//! - `add`: stage working-tree files
//! - `commit`: snapshot the stage onto the current branch
//! - `branch`: create and list branches
//! - `checkout`: switch branches and sync the working tree
//! - `merge`: fast-forward or three-way merge another branch
//! - `status`: classify staged files against the current head

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod merge;
pub mod status;
