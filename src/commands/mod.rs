//! Command implementations
//!
//! Commands are grouped the way git groups them:
//!
//! - `plumbing`: direct object manipulation (hash-object, mktree, ls-tree)
//! - `porcelain`: user-facing operations (init)
//!
//! Each command is an `impl Repository` block writing its output through the
//! repository's injected writer.

pub mod plumbing;
pub mod porcelain;
