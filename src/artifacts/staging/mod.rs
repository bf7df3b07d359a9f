//! Staging area primitives
//!
//! `mktree` never touches the on-disk index file; it stages tree entries in
//! an ephemeral, in-memory index that lives exactly as long as one segment's
//! materialization. The index is seeded in already-sorted order and reduced
//! to a single stored tree object.

pub mod entry_mode;

use crate::areas::database::Database;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeRecord};
use crate::artifacts::staging::entry_mode::EntryMode;
use crate::artifacts::treebuild::error::TreeBuildError;

/// Ephemeral staging index for one tree materialization
///
/// Entries are appended in the order the caller provides; no sortedness check
/// is performed (the conflict sorter guarantees it upstream). Directory and
/// submodule entries are staged as opaque leaves and never expanded.
#[derive(Debug, Default)]
pub struct StagingIndex {
    entries: Vec<TreeRecord>,
}

impl StagingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage one entry under its on-disk name
    ///
    /// The ordering-only trailing slash of directory names is dropped here;
    /// tree objects never store it. An inconsistent entry (empty name once
    /// normalized) is a contract violation, not a recoverable condition.
    pub fn push(&mut self, mode: EntryMode, oid: ObjectId, name: &str) -> anyhow::Result<()> {
        let name = if mode.is_tree() {
            name.strip_suffix('/').unwrap_or(name)
        } else {
            name
        };

        if name.is_empty() {
            return Err(TreeBuildError::Materialization(name.to_owned()).into());
        }

        self.entries.push(TreeRecord::new(mode, oid, name.to_owned()));
        Ok(())
    }

    /// Reduce the staged entries to a single stored tree object
    pub fn write_tree(self, database: &Database) -> anyhow::Result<ObjectId> {
        let tree = Tree::from_records(self.entries);
        database.store(&tree)?;
        tree.object_id()
    }
}
