//! A git tree construction toolkit
//!
//! The crate builds git tree objects from index-info formatted descriptions
//! and stores them in a loose object database. The `mktree` command validates,
//! sorts, and deduplicates entries before writing; `--literally` bypasses all
//! of that to write a tree exactly as given.
//!
//! Modules:
//!
//! - `areas`: the repository facade, object database, and workspace
//! - `artifacts`: objects, entry modes, and the tree construction engine
//! - `commands`: plumbing and porcelain command implementations

pub mod areas;
pub mod artifacts;
pub mod commands;
