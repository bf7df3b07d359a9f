//! Plumbing commands (low-level object operations)
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob id and optionally store it
//! - `mktree`: Build tree objects from index-info formatted input
//! - `ls-tree`: List the contents of a stored tree object

pub mod hash_object;
pub mod ls_tree;
pub mod mktree;
