//! Tree construction engine
//!
//! Reduces an unordered, possibly duplicate-laden stream of
//! `(mode, oid, path)` candidates to canonical tree objects:
//!
//! - `entry`: one candidate tree entry and its two ordering keys
//! - `collection`: entry accumulation, the conflict-aware two-phase
//!   sort-and-dedup, and the directory/file conflict index
//! - `path_check`: path-segment validity
//! - `index_info`: the line-oriented input record parser
//! - `materialize`: validated and literal tree-writing strategies
//! - `batch`: the accumulate/finalize/emit cycle behind `mktree --batch`
//! - `error`: the failure taxonomy; every kind aborts the whole invocation

pub mod batch;
pub mod collection;
pub mod entry;
pub mod error;
pub mod index_info;
pub mod materialize;
pub mod path_check;
