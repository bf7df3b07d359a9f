//! Tree materialization strategies
//!
//! Two interchangeable ways to turn a finalized entry collection into exactly
//! one stored tree object:
//!
//! - **validated**: runs the conflict sorter, then stages the survivors in an
//!   ephemeral index and reduces it to a tree. This is the path behind plain
//!   `mktree`.
//! - **literal**: serializes the entries exactly as appended, duplicates,
//!   misordering and all. Exists so callers can construct deliberately
//!   malformed trees to exercise downstream consumers.

use crate::areas::database::Database;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeRecord};
use crate::artifacts::staging::StagingIndex;
use crate::artifacts::treebuild::collection::EntryCollection;

/// Sort, deduplicate, and write one validated tree
///
/// The staging index is seeded in the collection's canonical order with no
/// further sortedness check; an insertion failure there is an invariant
/// violation and aborts the invocation.
pub fn write_tree(
    database: &Database,
    collection: &mut EntryCollection,
) -> anyhow::Result<ObjectId> {
    collection.sort_and_dedup();

    let mut staging = StagingIndex::new();
    for entry in collection.entries() {
        staging.push(entry.mode(), entry.oid().clone(), entry.name())?;
    }

    staging.write_tree(database)
}

/// Write one tree from the entries exactly as appended
///
/// No sorting, deduplication, or validation of any kind; whatever conflicts
/// the caller supplied are preserved byte for byte.
pub fn write_tree_literally(
    database: &Database,
    collection: &EntryCollection,
) -> anyhow::Result<ObjectId> {
    let records = collection
        .entries()
        .iter()
        .map(|entry| TreeRecord::new(entry.mode(), entry.oid().clone(), entry.name().to_owned()))
        .collect();

    let tree = Tree::from_records(records);
    database.store(&tree)?;
    tree.object_id()
}
